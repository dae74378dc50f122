use crate::deps_tree::DependencyTree;
use crate::format::{
    render_list, FILE_MARKER, FLOW_PREFIX, META_PREFIX, SEPARATOR_LINE, TREE_HEADER, TYPE_PREFIX,
};
use crate::types::{Metadata, StateVar};

/// Render one annotated section: boundary block, flow line, metadata lines,
/// dependency tree, then the body with inline type hints.
#[must_use]
pub fn render_section(path: &str, meta: &Metadata, tree: &DependencyTree, body: &[String]) -> Vec<String> {
    let mut out = vec![
        String::new(),
        SEPARATOR_LINE.to_string(),
        format!("{FILE_MARKER} {path}"),
        SEPARATOR_LINE.to_string(),
        format!("{FLOW_PREFIX} {}", meta.flow),
        String::new(),
    ];

    out.extend(metadata_lines(meta));
    out.push(String::new());

    out.push(TREE_HEADER.to_string());
    out.extend(tree.render_lines());
    out.push(String::new());

    out.extend(annotate_body(body, &meta.state));
    out
}

/// The eight `// META:` lines in fixed field order
#[must_use]
pub fn metadata_lines(meta: &Metadata) -> Vec<String> {
    let state = render_list(meta.state.iter().map(|v| format!("{}:{}", v.name, v.ty)));
    let endpoints = render_list(meta.endpoints.iter().map(ToString::to_string));

    let fields = [
        ("Type", meta.role.to_string()),
        ("Flow", meta.flow.to_string()),
        ("Framework", meta.framework.to_string()),
        ("State", state),
        ("Props", render_list(&meta.props)),
        ("Context", render_list(&meta.contexts)),
        ("APIs", endpoints),
        ("Dependencies", render_list(&meta.imports)),
    ];

    fields
        .into_iter()
        .map(|(field, value)| format!("{META_PREFIX} {field}: {value}"))
        .collect()
}

/// Copy `body`, inserting a `// TYPE:` line above each matched state declaration.
///
/// A line matches when it mentions a state initializer call and the
/// `name, setter` pair of a not-yet-placed state variable. The hint takes the
/// declaration's indentation; no other line is touched.
#[must_use]
pub fn annotate_body(body: &[String], state: &[StateVar]) -> Vec<String> {
    let mut out = Vec::with_capacity(body.len() + state.len());
    let mut placed = vec![false; state.len()];

    for line in body {
        if line.contains("useState") || line.contains("useReducer") {
            let hit = state
                .iter()
                .enumerate()
                .find(|(i, var)| !placed[*i] && has_binding_pair(line, &var.name, &var.setter));
            if let Some((i, var)) = hit {
                placed[i] = true;
                let indent = &line[..line.len() - line.trim_start().len()];
                out.push(format!("{indent}{TYPE_PREFIX} {}", var.ty));
            }
        }
        out.push(line.clone());
    }

    out
}

/// Whether `line` contains `name` `,` `setter` with optional whitespace, on identifier boundaries
fn has_binding_pair(line: &str, name: &str, setter: &str) -> bool {
    line.match_indices(name).any(|(start, _)| {
        let before_ok = line[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !is_ident_char(c));
        let Some(rest) = line[start + name.len()..].trim_start().strip_prefix(',') else {
            return false;
        };
        let Some(after) = rest.trim_start().strip_prefix(setter) else {
            return false;
        };
        before_ok && !after.starts_with(is_ident_char)
    })
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Flow, Framework, Role, StateKind};
    use pretty_assertions::assert_eq;

    fn counter() -> StateVar {
        StateVar {
            name: "count".into(),
            setter: "setCount".into(),
            ty: "number".into(),
            initial: "0".into(),
            kind: StateKind::UseState,
        }
    }

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    #[test]
    fn type_hint_goes_directly_above_declaration() {
        let body = lines("function C() {\n    const [count, setCount] = useState(0);\n}");
        assert_eq!(
            annotate_body(&body, &[counter()]),
            lines("function C() {\n    // TYPE: number\n    const [count, setCount] = useState(0);\n}")
        );
    }

    #[test]
    fn unmatched_lines_are_untouched() {
        let body = lines("const [amount, setAmount] = useState(1);\nconst x = count;");
        assert_eq!(annotate_body(&body, &[counter()]), body);
        assert_eq!(annotate_body(&body, &[]), body);
    }

    #[test]
    fn pair_matching_respects_identifier_boundaries() {
        assert!(has_binding_pair("const [count,setCount] = useState(0)", "count", "setCount"));
        assert!(!has_binding_pair("const [discount, setCount2] = useState(0)", "count", "setCount"));
        assert!(!has_binding_pair("const [count, setCountry] = useState(0)", "count", "setCount"));
    }

    #[test]
    fn metadata_lines_render_empty_fields_as_none() {
        let meta = Metadata {
            role: Role::Module,
            flow: Flow::Shared,
            framework: Framework::TypeScript,
            state: vec![counter()],
            props: vec![],
            contexts: vec![],
            endpoints: vec![],
            imports: vec!["zod".into()],
        };
        assert_eq!(
            metadata_lines(&meta),
            vec![
                "// META: Type: Module",
                "// META: Flow: SHARED",
                "// META: Framework: TypeScript",
                "// META: State: [count:number]",
                "// META: Props: [none]",
                "// META: Context: [none]",
                "// META: APIs: [none]",
                "// META: Dependencies: [zod]",
            ]
        );
    }
}
