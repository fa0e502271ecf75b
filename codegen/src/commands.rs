//! Lazily created command properties.

use crate::config::GeneratorOptions;
use crate::emit::{EmitError, Indented};
use crate::flavor::Flavor;
use crate::resolve::{CallbackBinding, CommandSpec};

/// Emits the backing field and command property for `spec`.
///
/// # Errors
///
/// Propagates writer contract violations.
pub fn emit_command(
    w: &mut Indented<'_>,
    spec: &CommandSpec,
    flavor: Flavor,
    options: &GeneratorOptions,
) -> Result<(), EmitError> {
    let command_type = command_type(spec, flavor);
    w.line(&format!("{} {};", options.nullable(&command_type), spec.field))?;
    w.line(&format!(
        "public {command_type} {} => {} ??= new {command_type}({});",
        spec.name,
        spec.field,
        constructor_args(spec, flavor).join(", ")
    ))
}

fn command_type(spec: &CommandSpec, flavor: Flavor) -> String {
    let base = flavor.command_type(spec.is_async);
    match &spec.parameter {
        Some(param) => format!("{base}<{}>", param.display()),
        None => base.to_string(),
    }
}

fn constructor_args(spec: &CommandSpec, flavor: Flavor) -> Vec<String> {
    let execute = if spec.is_async && flavor.wraps_async_execute() {
        if spec.parameter.is_some() {
            format!("async (arg) => await {}(arg)", spec.method)
        } else {
            format!("async () => await {}()", spec.method)
        }
    } else {
        spec.method.clone()
    };
    let can_execute = match &spec.can_execute {
        CallbackBinding::None => None,
        CallbackBinding::Bound { method, .. } if spec.wraps_predicate() => {
            Some(format!("_ => {method}()"))
        }
        CallbackBinding::Bound { method, .. } => Some(method.clone()),
    };

    let mut args = vec![execute];
    match flavor {
        Flavor::DevExpress => {
            args.push(can_execute.unwrap_or_else(|| "null".to_string()));
            if spec.is_async {
                args.push(spec.allow_multiple_execution.to_string());
            }
            args.push(spec.use_command_manager.to_string());
        }
        Flavor::Prism | Flavor::MvvmLight => args.extend(can_execute),
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::SourceWriter;
    use vmgen_model::TypeRef;

    fn spec(method: &str) -> CommandSpec {
        CommandSpec {
            method: method.into(),
            name: format!("{method}Command"),
            field: format!("{}Command", method.to_lowercase()),
            parameter: None,
            is_async: false,
            can_execute: CallbackBinding::None,
            allow_multiple_execution: false,
            use_command_manager: true,
        }
    }

    fn render(spec: &CommandSpec, flavor: Flavor) -> String {
        let mut w = SourceWriter::new(4);
        emit_command(&mut w.root(), spec, flavor, &GeneratorOptions::default()).unwrap();
        w.finish()
    }

    #[test]
    fn devexpress_sync_command() {
        let mut s = spec("Save");
        s.can_execute = CallbackBinding::Bound {
            method: "CanSave".into(),
            takes_argument: false,
        };
        assert_eq!(
            render(&s, Flavor::DevExpress),
            "DelegateCommand? saveCommand;\n\
             public DelegateCommand SaveCommand => saveCommand ??= new DelegateCommand(Save, CanSave, true);\n"
        );
    }

    #[test]
    fn devexpress_async_command_with_parameter() {
        let mut s = spec("Load");
        s.is_async = true;
        s.parameter = Some(TypeRef::value("int"));
        s.allow_multiple_execution = true;
        s.use_command_manager = false;
        assert_eq!(
            render(&s, Flavor::DevExpress),
            "AsyncCommand<int>? loadCommand;\n\
             public AsyncCommand<int> LoadCommand => loadCommand ??= new AsyncCommand<int>(Load, null, true, false);\n"
        );
    }

    #[test]
    fn prism_wraps_async_methods() {
        let mut s = spec("Load");
        s.is_async = true;
        assert!(render(&s, Flavor::Prism)
            .contains("new DelegateCommand(async () => await Load());"));
    }

    #[test]
    fn mvvmlight_relay_command_with_discarded_parameter() {
        let mut s = spec("Open");
        s.parameter = Some(TypeRef::new("string").nullable());
        s.can_execute = CallbackBinding::Bound {
            method: "CanOpen".into(),
            takes_argument: false,
        };
        assert_eq!(
            render(&s, Flavor::MvvmLight),
            "RelayCommand<string?>? openCommand;\n\
             public RelayCommand<string?> OpenCommand => openCommand ??= new RelayCommand<string?>(Open, _ => CanOpen());\n"
        );
    }
}
