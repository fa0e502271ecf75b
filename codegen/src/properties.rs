//! Property declarations and the cached event-args trailer.

use crate::emit::{EmitError, Indented};
use crate::mapping;
use crate::resolve::{CallbackBinding, HookShape, PropertySpec, RaiseHook};

/// Hooks the setters of one type call.
#[derive(Debug, Clone, Default)]
pub struct SetterHooks {
    /// Called after assignment.
    pub changed: Option<RaiseHook>,
    /// Called before assignment.
    pub changing: Option<RaiseHook>,
}

/// Emits one property with its notifying setter.
///
/// # Errors
///
/// Propagates writer contract violations.
pub fn emit_property(
    w: &mut Indented<'_>,
    spec: &PropertySpec,
    hooks: &SetterHooks,
) -> Result<(), EmitError> {
    let ty = spec.ty.display();
    let field = field_ref(&spec.field);
    let modifier = if spec.is_virtual { "virtual " } else { "" };

    w.line(&format!("public {modifier}{ty} {} {{", spec.name))?;
    {
        let mut prop = w.tab();
        prop.line(&format!("get => {field};"))?;
        prop.line(&format!("{}set {{", spec.setter_access.modifier()))?;
        let mut body = prop.tab();
        body.line(&format!(
            "if(EqualityComparer<{ty}>.Default.Equals({field}, value)) return;"
        ))?;
        if let Some(hook) = &hooks.changing {
            body.line(&hook_call(hook, &spec.name, true))?;
        }
        if let CallbackBinding::Bound {
            method,
            takes_argument,
        } = &spec.changing
        {
            let arg = if *takes_argument { "value" } else { "" };
            body.line(&format!("{method}({arg});"))?;
        }
        let keeps_old = spec.changed.takes_argument();
        if keeps_old {
            body.line(&format!("var oldValue = {field};"))?;
        }
        body.line(&format!("{field} = value;"))?;
        if let Some(hook) = &hooks.changed {
            body.line(&hook_call(hook, &spec.name, false))?;
        }
        if let Some(method) = spec.changed.method() {
            let arg = if keeps_old { "oldValue" } else { "" };
            body.line(&format!("{method}({arg});"))?;
        }
        prop.line("}")?;
    }
    w.line("}")
}

/// Emits the cached event-args statics referenced by the setters. Returns
/// `false` and writes nothing when no setter uses an event-args hook.
///
/// # Errors
///
/// Propagates writer contract violations.
pub fn emit_event_args_trailer(
    w: &mut Indented<'_>,
    specs: &[PropertySpec],
    hooks: &SetterHooks,
) -> Result<bool, EmitError> {
    if !needs_event_args_trailer(specs, hooks) {
        return Ok(false);
    }
    let changed = uses_event_args(&hooks.changed);
    let changing = uses_event_args(&hooks.changing);
    for spec in specs {
        if changed {
            w.line(&event_args_static(&spec.name, false))?;
        }
        if changing {
            w.line(&event_args_static(&spec.name, true))?;
        }
    }
    Ok(true)
}

/// Whether any setter references a cached event-args static.
pub fn needs_event_args_trailer(specs: &[PropertySpec], hooks: &SetterHooks) -> bool {
    !specs.is_empty() && (uses_event_args(&hooks.changed) || uses_event_args(&hooks.changing))
}

fn uses_event_args(hook: &Option<RaiseHook>) -> bool {
    matches!(hook, Some(h) if h.shape == HookShape::TakesEventArgs)
}

fn event_args_static(property: &str, changing: bool) -> String {
    let args_type = if changing {
        "PropertyChangingEventArgs"
    } else {
        "PropertyChangedEventArgs"
    };
    format!(
        "static {args_type} {} = new {args_type}(nameof({property}));",
        mapping::event_args_field(property, changing)
    )
}

fn hook_call(hook: &RaiseHook, property: &str, changing: bool) -> String {
    match hook.shape {
        HookShape::TakesEventArgs => format!(
            "{}({});",
            hook.name,
            mapping::event_args_field(property, changing)
        ),
        HookShape::TakesString => format!("{}(nameof({property}));", hook.name),
    }
}

/// Setter-side reference to a backing field. Fields that collide with the
/// setter's `value` or `oldValue` locals are qualified with `this.`.
fn field_ref(field: &str) -> String {
    match field {
        "value" | "oldValue" => format!("this.{field}"),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::SourceWriter;
    use crate::options::SetterAccess;
    use vmgen_model::TypeRef;

    fn spec(field: &str, name: &str) -> PropertySpec {
        PropertySpec {
            field: field.into(),
            name: name.into(),
            ty: TypeRef::new("string").nullable(),
            is_virtual: false,
            setter_access: SetterAccess::Public,
            changed: CallbackBinding::None,
            changing: CallbackBinding::None,
        }
    }

    fn event_args_hooks(changing: bool) -> SetterHooks {
        SetterHooks {
            changed: RaiseHook::synthesized(crate::resolve::Capability::PropertyChanged),
            changing: if changing {
                RaiseHook::synthesized(crate::resolve::Capability::PropertyChanging)
            } else {
                None
            },
        }
    }

    fn render(spec: &PropertySpec, hooks: &SetterHooks) -> String {
        let mut w = SourceWriter::new(4);
        emit_property(&mut w.root(), spec, hooks).unwrap();
        w.finish()
    }

    #[test]
    fn plain_setter() {
        assert_eq!(
            render(&spec("_name", "Name"), &event_args_hooks(false)),
            "public string? Name {\n\
             \x20   get => _name;\n\
             \x20   set {\n\
             \x20       if(EqualityComparer<string?>.Default.Equals(_name, value)) return;\n\
             \x20       _name = value;\n\
             \x20       RaisePropertyChanged(NameChangedEventArgs);\n\
             \x20   }\n\
             }\n"
        );
    }

    #[test]
    fn full_setter_order() {
        let mut s = spec("_name", "Name");
        s.is_virtual = true;
        s.setter_access = SetterAccess::Protected;
        s.changed = CallbackBinding::Bound {
            method: "OnNameChanged".into(),
            takes_argument: true,
        };
        s.changing = CallbackBinding::Bound {
            method: "OnNameChanging".into(),
            takes_argument: true,
        };
        let text = render(&s, &event_args_hooks(true));
        let body: Vec<&str> = text.lines().map(str::trim).collect();
        assert_eq!(
            body,
            [
                "public virtual string? Name {",
                "get => _name;",
                "protected set {",
                "if(EqualityComparer<string?>.Default.Equals(_name, value)) return;",
                "RaisePropertyChanging(NameChangingEventArgs);",
                "OnNameChanging(value);",
                "var oldValue = _name;",
                "_name = value;",
                "RaisePropertyChanged(NameChangedEventArgs);",
                "OnNameChanged(oldValue);",
                "}",
                "}",
            ]
        );
    }

    #[test]
    fn string_hooks_pass_the_name() {
        let hooks = SetterHooks {
            changed: Some(RaiseHook {
                name: "RaisePropertyChanged".into(),
                shape: HookShape::TakesString,
            }),
            changing: None,
        };
        let text = render(&spec("_name", "Name"), &hooks);
        assert!(text.contains("RaisePropertyChanged(nameof(Name));"));

        let mut w = SourceWriter::new(4);
        let wrote = emit_event_args_trailer(&mut w.root(), &[spec("_name", "Name")], &hooks).unwrap();
        assert!(!wrote);
        assert_eq!(w.finish(), "");
    }

    #[test]
    fn colliding_field_names_are_qualified() {
        let mut s = spec("value", "Value");
        s.changed = CallbackBinding::Bound {
            method: "OnValueChanged".into(),
            takes_argument: true,
        };
        let text = render(&s, &event_args_hooks(false));
        assert!(text.contains("Equals(this.value, value)"));
        assert!(text.contains("var oldValue = this.value;"));
        assert!(text.contains("this.value = value;"));
    }

    #[test]
    fn zero_argument_changed_callback_skips_old_value() {
        let mut s = spec("_name", "Name");
        s.changed = CallbackBinding::Bound {
            method: "OnNameChanged".into(),
            takes_argument: false,
        };
        let text = render(&s, &event_args_hooks(false));
        assert!(!text.contains("oldValue"));
        assert!(text.contains("        OnNameChanged();\n"));
    }

    #[test]
    fn trailer_lists_statics_per_property() {
        let mut w = SourceWriter::new(4);
        let specs = [spec("_a", "A"), spec("_b", "B")];
        assert!(emit_event_args_trailer(&mut w.root(), &specs, &event_args_hooks(true)).unwrap());
        assert_eq!(
            w.finish(),
            "static PropertyChangedEventArgs AChangedEventArgs = new PropertyChangedEventArgs(nameof(A));\n\
             static PropertyChangingEventArgs AChangingEventArgs = new PropertyChangingEventArgs(nameof(A));\n\
             static PropertyChangedEventArgs BChangedEventArgs = new PropertyChangedEventArgs(nameof(B));\n\
             static PropertyChangingEventArgs BChangingEventArgs = new PropertyChangingEventArgs(nameof(B));\n"
        );
    }
}
