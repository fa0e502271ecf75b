//! Layout of one emitted unit: banner, usings, namespace and enclosing-type
//! wrappers around the partial declaration and its member blocks.

use serde::Serialize;
use vmgen_model::model::with_type_parameters;
use vmgen_model::TypeSymbol;

use crate::commands::emit_command;
use crate::config::GeneratorOptions;
use crate::emit::{EmitError, Indented, SourceWriter};
use crate::flavor::Flavor;
use crate::interfaces::emit_capability;
use crate::properties::{emit_event_args_trailer, emit_property, needs_event_args_trailer, SetterHooks};
use crate::resolve::{CommandSpec, Declaration, PropertySpec};

/// A named text unit produced for one view-model type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmittedUnit {
    /// Unique file name within the pass.
    pub hint_name: String,
    /// Qualified name of the type the unit extends.
    pub type_name: String,
    /// Full text.
    pub text: String,
}

/// What the emitters need to know about the type being extended.
#[derive(Debug, Clone, Copy)]
pub struct EmitContext<'a> {
    /// The view-model type.
    pub ty: &'a TypeSymbol,
    /// Resolved flavor.
    pub flavor: Flavor,
    /// Output options.
    pub options: &'a GeneratorOptions,
}

impl EmitContext<'_> {
    /// Accessibility of synthesized hooks: `private` in sealed types since
    /// nothing can derive from them.
    pub fn hook_access(&self) -> &'static str {
        if self.ty.is_sealed {
            "private"
        } else {
            "protected"
        }
    }
}

/// Everything resolved for one type, ready to be written.
#[derive(Debug, Clone)]
pub struct UnitPlan<'a> {
    /// The view-model type.
    pub ty: &'a TypeSymbol,
    /// Resolved flavor.
    pub flavor: Flavor,
    /// Capabilities whose interface and boilerplate are emitted.
    pub declared: Vec<Declaration>,
    /// Hooks called by property setters.
    pub hooks: SetterHooks,
    /// Properties in field declaration order.
    pub properties: Vec<PropertySpec>,
    /// Commands in method declaration order.
    pub commands: Vec<CommandSpec>,
}

/// Renders `plan` to text.
///
/// # Errors
///
/// Propagates writer contract violations.
pub fn render_unit(plan: &UnitPlan<'_>, options: &GeneratorOptions) -> Result<String, EmitError> {
    let ctx = EmitContext {
        ty: plan.ty,
        flavor: plan.flavor,
        options,
    };
    let mut writer = SourceWriter::new(options.indent_width);
    {
        let mut root = writer.root();
        if options.banner {
            root.line("// <auto-generated/>")?;
            root.line("#pragma warning disable")?;
        }
        if options.nullable_context {
            root.line("#nullable enable")?;
        }
        if options.banner || options.nullable_context {
            root.blank();
        }
        for using in plan.flavor.usings() {
            root.line(&format!("using {using};"))?;
        }
        root.blank();

        match plan.ty.namespace.as_deref().filter(|ns| !ns.is_empty()) {
            Some(ns) => {
                root.line(&format!("namespace {ns} {{"))?;
                emit_wrappers(&mut root.tab(), plan, &ctx, 0)?;
                root.line("}")?;
            }
            None => emit_wrappers(&mut root, plan, &ctx, 0)?,
        }
    }
    Ok(writer.finish())
}

fn emit_wrappers(
    w: &mut Indented<'_>,
    plan: &UnitPlan<'_>,
    ctx: &EmitContext<'_>,
    level: usize,
) -> Result<(), EmitError> {
    let Some(outer) = plan.ty.containing_types.get(level) else {
        return emit_declaration(w, plan, ctx);
    };
    w.line(&format!(
        "partial {} {} {{",
        outer.kind.keyword(),
        with_type_parameters(&outer.name, &outer.type_parameters)
    ))?;
    emit_wrappers(&mut w.tab(), plan, ctx, level + 1)?;
    w.line("}")
}

fn emit_declaration(
    w: &mut Indented<'_>,
    plan: &UnitPlan<'_>,
    ctx: &EmitContext<'_>,
) -> Result<(), EmitError> {
    let mut header = format!("partial {} {}", plan.ty.kind.keyword(), plan.ty.display_name());
    if !plan.declared.is_empty() {
        let names: Vec<&str> = plan
            .declared
            .iter()
            .map(|d| d.capability.interface_simple_name())
            .collect();
        header.push_str(" : ");
        header.push_str(&names.join(", "));
    }
    header.push_str(" {");
    w.line(&header)?;
    {
        let mut body = w.tab();
        let mut blocks = Blocks::default();
        for declaration in &plan.declared {
            blocks.next(&mut body);
            emit_capability(&mut body, *declaration, ctx)?;
        }
        for property in &plan.properties {
            blocks.next(&mut body);
            emit_property(&mut body, property, &plan.hooks)?;
        }
        for command in &plan.commands {
            blocks.next(&mut body);
            emit_command(&mut body, command, plan.flavor, ctx.options)?;
        }
        if needs_event_args_trailer(&plan.properties, &plan.hooks) {
            blocks.next(&mut body);
            emit_event_args_trailer(&mut body, &plan.properties, &plan.hooks)?;
        }
    }
    w.line("}")
}

/// Separates member blocks with a single blank line.
#[derive(Debug, Default)]
struct Blocks {
    started: bool,
}

impl Blocks {
    fn next(&mut self, w: &mut Indented<'_>) {
        if self.started {
            w.blank();
        }
        self.started = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::Capability;
    use vmgen_model::{ContainingType, TypeKind};

    fn plan(ty: &TypeSymbol) -> UnitPlan<'_> {
        UnitPlan {
            ty,
            flavor: Flavor::DevExpress,
            declared: Vec::new(),
            hooks: SetterHooks::default(),
            properties: Vec::new(),
            commands: Vec::new(),
        }
    }

    #[test]
    fn header_only_unit() {
        let ty = TypeSymbol::class(Some("App"), "Vm");
        let text = render_unit(&plan(&ty), &GeneratorOptions::default()).unwrap();
        assert_eq!(
            text,
            "// <auto-generated/>\n\
             #pragma warning disable\n\
             #nullable enable\n\
             \n\
             using System;\n\
             using System.Collections.Generic;\n\
             using System.ComponentModel;\n\
             using System.Threading.Tasks;\n\
             using System.Windows.Input;\n\
             using DevExpress.Mvvm;\n\
             \n\
             namespace App {\n\
             \x20   partial class Vm {\n\
             \x20   }\n\
             }\n"
        );
    }

    #[test]
    fn nested_generic_unit_without_namespace() {
        let mut ty = TypeSymbol::class(None, "Editor");
        ty.kind = TypeKind::Record;
        ty.type_parameters = vec!["T".into()];
        ty.containing_types.push(ContainingType {
            name: "Host".into(),
            kind: TypeKind::Class,
            type_parameters: vec!["U".into()],
            is_partial: true,
        });
        let mut p = plan(&ty);
        p.declared = vec![Capability::PropertyChanged.into()];
        let options = GeneratorOptions {
            banner: false,
            nullable_context: false,
            ..GeneratorOptions::default()
        };
        let text = render_unit(&p, &options).unwrap();
        assert!(text.starts_with("using System;\n"));
        assert!(text.contains(
            "partial class Host<U> {\n    partial record Editor<T> : INotifyPropertyChanged {\n        public event PropertyChangedEventHandler PropertyChanged;\n"
        ));
        assert!(text.ends_with("    }\n}\n"));
    }
}
