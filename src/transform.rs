use serde::Deserialize;
use swc_core::{
    common::DUMMY_SP,
    ecma::{
        ast::*,
        visit::{VisitMut, VisitMutWith},
    },
};

use crate::classes::{is_spacing_property, synthesize};
use crate::value::{Scalar, SpacingValue};

// -----------------------------------------------------------------------------
// Plugin config
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PluginConfig {
    /// Components whose spacing props get migrated. Empty means every custom
    /// (capitalized or member-expression) component.
    pub components: Vec<String>,
    pub class_attribute: String,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            components: Vec::new(),
            class_attribute: "className".to_string(),
        }
    }
}

impl PluginConfig {
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(%err, "invalid plugin config, using defaults");
                Self::default()
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Transform state
// -----------------------------------------------------------------------------

pub struct SpacingTransform {
    config: PluginConfig,
    elements: usize,
    attributes: usize,
}

impl SpacingTransform {
    pub fn new(config: PluginConfig) -> Self {
        Self {
            config,
            elements: 0,
            attributes: 0,
        }
    }

    fn element_name(name: &JSXElementName) -> Option<String> {
        fn object_path(obj: &JSXObject) -> Option<String> {
            match obj {
                JSXObject::Ident(id) => Some(id.sym.to_string()),
                JSXObject::JSXMemberExpr(m) => {
                    Some(format!("{}.{}", object_path(&m.obj)?, m.prop.sym))
                }
            }
        }
        match name {
            JSXElementName::Ident(id) => Some(id.sym.to_string()),
            JSXElementName::JSXMemberExpr(m) => {
                Some(format!("{}.{}", object_path(&m.obj)?, m.prop.sym))
            }
            JSXElementName::JSXNamespacedName(_) => None,
        }
    }

    fn is_target(&self, name: &JSXElementName) -> bool {
        if self.config.components.is_empty() {
            return match name {
                JSXElementName::Ident(ident) => ident
                    .sym
                    .chars()
                    .next()
                    .map(|c| c.is_uppercase())
                    .unwrap_or(false),
                JSXElementName::JSXMemberExpr(_) => true,
                JSXElementName::JSXNamespacedName(_) => false,
            };
        }
        Self::element_name(name)
            .map(|n| self.config.components.iter().any(|c| *c == n))
            .unwrap_or(false)
    }

    fn attr_name(attr: &JSXAttr) -> Option<&str> {
        match &attr.name {
            JSXAttrName::Ident(id) => Some(id.sym.as_ref()),
            JSXAttrName::JSXNamespacedName(_) => None,
        }
    }

    fn find_attr(attrs: &[JSXAttrOrSpread], key: &str) -> Option<usize> {
        attrs.iter().position(|a| match a {
            JSXAttrOrSpread::JSXAttr(attr) => Self::attr_name(attr) == Some(key),
            JSXAttrOrSpread::SpreadElement(_) => false,
        })
    }

    /// Current class string. `Some(None)` when absent, `None` when dynamic.
    fn static_class(attr: &JSXAttr) -> Option<Option<String>> {
        match &attr.value {
            None => Some(None),
            Some(JSXAttrValue::Lit(Lit::Str(s))) => Some(Some(s.value.to_string())),
            Some(JSXAttrValue::JSXExprContainer(JSXExprContainer {
                expr: JSXExpr::Expr(expr),
                ..
            })) => static_text(expr).map(Some),
            _ => None,
        }
    }

    fn string_value(val: String) -> JSXAttrValue {
        JSXAttrValue::Lit(Lit::Str(Str {
            span: DUMMY_SP,
            value: val.into(),
            raw: None,
        }))
    }

    fn migrate(&mut self, el: &mut JSXOpeningElement) {
        let class_key = self.config.class_attribute.clone();
        let class_ix = Self::find_attr(&el.attrs, &class_key);
        let existing = match class_ix.map(|ix| &el.attrs[ix]) {
            Some(JSXAttrOrSpread::JSXAttr(attr)) => match Self::static_class(attr) {
                Some(existing) => existing,
                None => {
                    tracing::debug!(
                        attribute = %class_key,
                        "dynamic class attribute, element skipped"
                    );
                    return;
                }
            },
            _ => None,
        };

        let mut converted = Vec::new();
        let mut classes = Vec::new();
        for (ix, a) in el.attrs.iter().enumerate() {
            let JSXAttrOrSpread::JSXAttr(attr) = a else { continue };
            let Some(name) = Self::attr_name(attr) else { continue };
            if !is_spacing_property(name) {
                continue;
            }
            let Some(value) = attr_spacing_value(attr) else {
                tracing::debug!(property = name, "non-static spacing value left in place");
                continue;
            };
            match value.map(|v| synthesize(name, &v)).transpose() {
                Ok(out) => {
                    converted.push(ix);
                    if let Some(out) = out.filter(|s| !s.is_empty()) {
                        classes.push(out);
                    }
                }
                Err(err) => tracing::debug!(%err, "spacing attribute skipped"),
            }
        }
        if converted.is_empty() {
            return;
        }

        self.elements += 1;
        self.attributes += converted.len();

        let merged = existing
            .into_iter()
            .map(|s| s.trim().to_string())
            .chain(classes)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        match class_ix {
            Some(ix) => {
                if let JSXAttrOrSpread::JSXAttr(attr) = &mut el.attrs[ix] {
                    attr.value = Some(Self::string_value(merged));
                }
            }
            None if !merged.is_empty() => {
                el.attrs.push(JSXAttrOrSpread::JSXAttr(JSXAttr {
                    span: DUMMY_SP,
                    name: JSXAttrName::Ident(IdentName::new(class_key.into(), DUMMY_SP)),
                    value: Some(Self::string_value(merged)),
                }));
            }
            None => {}
        }

        let mut ix = 0;
        el.attrs.retain(|_| {
            let keep = !converted.contains(&ix);
            ix += 1;
            keep
        });
    }
}

impl VisitMut for SpacingTransform {
    fn visit_mut_module(&mut self, m: &mut Module) {
        m.visit_mut_children_with(self);
        tracing::debug!(
            elements = self.elements,
            attributes = self.attributes,
            "spacing props migrated"
        );
    }

    fn visit_mut_jsx_opening_element(&mut self, el: &mut JSXOpeningElement) {
        el.visit_mut_children_with(self);
        if self.is_target(&el.name) {
            self.migrate(el);
        }
    }
}

// -----------------------------------------------------------------------------
// Static value extraction
// -----------------------------------------------------------------------------

/// `None` when the value can't be known at build time. `Some(None)` for
/// values that are statically absent (`p={null}`).
fn attr_spacing_value(attr: &JSXAttr) -> Option<Option<SpacingValue>> {
    match attr.value.as_ref()? {
        JSXAttrValue::Lit(Lit::Str(s)) => {
            Some(Some(SpacingValue::Scalar(Scalar::Text(s.value.to_string()))))
        }
        JSXAttrValue::JSXExprContainer(JSXExprContainer {
            expr: JSXExpr::Expr(expr),
            ..
        }) => expr_spacing_value(expr),
        _ => None,
    }
}

fn expr_spacing_value(expr: &Expr) -> Option<Option<SpacingValue>> {
    match unwrap_expr(expr) {
        Expr::Array(arr) => {
            let mut items = Vec::with_capacity(arr.elems.len());
            for el in &arr.elems {
                match el {
                    None => items.push(None),
                    Some(ExprOrSpread { spread: Some(_), .. }) => return None,
                    Some(ExprOrSpread { expr, .. }) => items.push(expr_scalar(expr)?),
                }
            }
            Some(Some(SpacingValue::Sequence(items)))
        }
        Expr::Object(obj) => {
            let mut entries = Vec::with_capacity(obj.props.len());
            for p in &obj.props {
                let PropOrSpread::Prop(p) = p else { return None };
                let Prop::KeyValue(kv) = &**p else { return None };
                let key = prop_key(&kv.key)?;
                entries.push((key, expr_scalar(&kv.value)?));
            }
            Some(Some(SpacingValue::Collection(entries)))
        }
        other => expr_scalar(other).map(|s| s.map(SpacingValue::Scalar)),
    }
}

/// Leaf extraction. Literal leaves that are neither numbers nor strings keep
/// their source text so they reach the bracketed fallback.
fn expr_scalar(expr: &Expr) -> Option<Option<Scalar>> {
    match unwrap_expr(expr) {
        Expr::Lit(Lit::Null(_)) => Some(None),
        Expr::Ident(i) if i.sym.as_ref() == "undefined" => Some(None),
        Expr::Lit(Lit::Num(n)) => Some(Some(Scalar::Number(n.value))),
        Expr::Unary(UnaryExpr {
            op: UnaryOp::Minus,
            arg,
            ..
        }) => match unwrap_expr(arg) {
            Expr::Lit(Lit::Num(n)) => Some(Some(Scalar::Number(-n.value))),
            _ => None,
        },
        Expr::Lit(Lit::Bool(b)) => Some(Some(Scalar::Text(b.value.to_string()))),
        e @ (Expr::Array(_) | Expr::Object(_)) => literal_text(e).map(|t| Some(Scalar::Text(t))),
        other => static_text(other).map(|t| Some(Scalar::Text(t))),
    }
}

fn static_text(expr: &Expr) -> Option<String> {
    match unwrap_expr(expr) {
        Expr::Lit(Lit::Str(s)) => Some(s.value.to_string()),
        // Cooked text is absent for invalid escapes; such templates stay dynamic.
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => tpl
            .quasis
            .iter()
            .map(|q| q.cooked.as_ref().map(|c| c.to_string()))
            .collect::<Option<String>>(),
        _ => None,
    }
}

/// Compact JSON-like text for nested literals, `None` if anything inside is
/// dynamic.
fn literal_text(expr: &Expr) -> Option<String> {
    match unwrap_expr(expr) {
        Expr::Lit(Lit::Null(_)) => Some("null".to_string()),
        Expr::Lit(Lit::Num(n)) => Some(n.value.to_string()),
        Expr::Lit(Lit::Bool(b)) => Some(b.value.to_string()),
        Expr::Unary(UnaryExpr {
            op: UnaryOp::Minus,
            arg,
            ..
        }) => match unwrap_expr(arg) {
            Expr::Lit(Lit::Num(n)) => Some((-n.value).to_string()),
            _ => None,
        },
        Expr::Array(arr) => {
            let mut parts = Vec::with_capacity(arr.elems.len());
            for el in &arr.elems {
                match el {
                    None => parts.push("null".to_string()),
                    Some(ExprOrSpread { spread: None, expr }) => parts.push(literal_text(expr)?),
                    Some(_) => return None,
                }
            }
            Some(format!("[{}]", parts.join(",")))
        }
        Expr::Object(obj) => {
            let mut parts = Vec::with_capacity(obj.props.len());
            for p in &obj.props {
                let PropOrSpread::Prop(p) = p else { return None };
                let Prop::KeyValue(kv) = &**p else { return None };
                let key = prop_key(&kv.key)?;
                let key = serde_json::to_string(&key).ok()?;
                parts.push(format!("{}:{}", key, literal_text(&kv.value)?));
            }
            Some(format!("{{{}}}", parts.join(",")))
        }
        other => static_text(other).and_then(|t| serde_json::to_string(&t).ok()),
    }
}

fn prop_key(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(i) => Some(i.sym.to_string()),
        PropName::Str(s) => Some(s.value.to_string()),
        PropName::Num(n) => Some(n.value.to_string()),
        _ => None,
    }
}

fn unwrap_expr(mut expr: &Expr) -> &Expr {
    loop {
        expr = match expr {
            Expr::Paren(p) => &*p.expr,
            Expr::TsAs(a) => &*a.expr,
            Expr::TsConstAssertion(c) => &*c.expr,
            Expr::TsSatisfies(s) => &*s.expr,
            _ => return expr,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use swc_core::common::{BytePos, Globals, GLOBALS};
    use swc_core::ecma::parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};
    use swc_core::ecma::visit::{Visit, VisitWith};

    #[derive(Default)]
    struct Collect {
        elements: Vec<(String, Vec<(String, String)>)>,
    }

    impl Visit for Collect {
        fn visit_jsx_opening_element(&mut self, el: &JSXOpeningElement) {
            let name = SpacingTransform::element_name(&el.name).unwrap_or_default();
            let attrs = el
                .attrs
                .iter()
                .filter_map(|a| match a {
                    JSXAttrOrSpread::JSXAttr(attr) => {
                        let key = SpacingTransform::attr_name(attr)?.to_string();
                        let val = match &attr.value {
                            Some(JSXAttrValue::Lit(Lit::Str(s))) => s.value.to_string(),
                            Some(_) => "{..}".to_string(),
                            None => String::new(),
                        };
                        Some((key, val))
                    }
                    JSXAttrOrSpread::SpreadElement(_) => Some(("...".into(), String::new())),
                })
                .collect();
            self.elements.push((name, attrs));
            el.visit_children_with(self);
        }
    }

    type Elements = Vec<(String, Vec<(String, String)>)>;

    fn run(config: PluginConfig, src: &str) -> Elements {
        let syntax = Syntax::Es(EsSyntax {
            jsx: true,
            ..Default::default()
        });
        run_with(syntax, config, src)
    }

    fn run_tsx(config: PluginConfig, src: &str) -> Elements {
        let syntax = Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        });
        run_with(syntax, config, src)
    }

    fn run_with(syntax: Syntax, config: PluginConfig, src: &str) -> Elements {
        GLOBALS.set(&Globals::new(), || {
            let input = StringInput::new(src, BytePos(1), BytePos(1 + src.len() as u32));
            let mut module = Parser::new(syntax, input, None)
                .parse_module()
                .expect("fixture parses");
            module.visit_mut_with(&mut SpacingTransform::new(config));
            let mut collect = Collect::default();
            module.visit_with(&mut collect);
            collect.elements
        })
    }

    fn attrs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn converts_scalar_props() {
        let out = run(
            PluginConfig::default(),
            r#"<Box p={4} mt="8px" mx={-1} id="a" />;"#,
        );
        assert_eq!(
            out,
            vec![(
                "Box".to_string(),
                attrs(&[("id", "a"), ("className", "p-4 mt-2 mx-[-4px]")])
            )]
        );
    }

    #[test]
    fn responsive_array_and_object() {
        let out = run(
            PluginConfig::default(),
            r#"<Box padding={["8px", null, "0.5rem"]} margin={{ base: "8px", md: 2, lg: "0.5rem" }} />;"#,
        );
        assert_eq!(
            out[0].1,
            attrs(&[("className", "p-2 md:p-2 m-2 md:m-2 lg:m-2")])
        );
    }

    #[test]
    fn appends_to_existing_class_name() {
        let out = run(
            PluginConfig::default(),
            r#"<Flex className="row " gap={`calc(1rem + 2px)`} />;"#,
        );
        assert_eq!(out[0].1, attrs(&[("className", "row gap-[calc(1rem+2px)]")]));
    }

    #[test]
    fn template_escapes_are_cooked() {
        let out = run(PluginConfig::default(), r#"<Box p={`1\u0072em`} m={`0.5\x72em`} />;"#);
        assert_eq!(out[0].1, attrs(&[("className", "p-4 m-2")]));
    }

    #[test]
    fn typescript_wrappers_are_looked_through() {
        let out = run_tsx(
            PluginConfig::default(),
            r#"<Box p={["8px", null, "0.5rem"] as const} m={(2 as number)} mt={4 satisfies number} />;"#,
        );
        assert_eq!(out[0].1, attrs(&[("className", "p-2 md:p-2 m-2 mt-4")]));
    }

    #[test]
    fn dynamic_values_are_left_alone() {
        let out = run(
            PluginConfig::default(),
            r#"<Box p={size} m={[1, size]} pt={2} />;"#,
        );
        assert_eq!(
            out[0].1,
            attrs(&[("p", "{..}"), ("m", "{..}"), ("className", "pt-2")])
        );
    }

    #[test]
    fn dynamic_class_name_skips_element() {
        let out = run(PluginConfig::default(), r#"<Box className={cls} p={2} />;"#);
        assert_eq!(out[0].1, attrs(&[("className", "{..}"), ("p", "{..}")]));
    }

    #[test]
    fn null_values_are_removed_without_classes() {
        let out = run(PluginConfig::default(), r#"<Box p={null} />;"#);
        assert_eq!(out[0].1, attrs(&[]));
    }

    #[test]
    fn dom_elements_are_ignored_by_default() {
        let out = run(PluginConfig::default(), r#"<div p={2}><Stack.Item m={1} /></div>;"#);
        assert_eq!(
            out,
            vec![
                ("div".to_string(), attrs(&[("p", "{..}")])),
                ("Stack.Item".to_string(), attrs(&[("className", "m-1")])),
            ]
        );
    }

    #[test]
    fn configured_components_only() {
        let config =
            PluginConfig::from_json(r#"{"components": ["Box"], "classAttribute": "class"}"#);
        let out = run(config, r#"<Box p={2}><Card p={2} /></Box>;"#);
        assert_eq!(
            out,
            vec![
                ("Box".to_string(), attrs(&[("class", "p-2")])),
                ("Card".to_string(), attrs(&[("p", "{..}")])),
            ]
        );
    }

    #[test]
    fn odd_literals_use_the_fallback() {
        let out = run(PluginConfig::default(), r#"<Box p={{ base: true }} m={[[1, 2]]} />;"#);
        assert_eq!(out[0].1, attrs(&[("className", "p-[true] m-[[1,2]]")]));
    }

    #[test]
    fn bad_config_falls_back_to_defaults() {
        let config = PluginConfig::from_json("{not json");
        assert!(config.components.is_empty());
        assert_eq!(config.class_attribute, "className");
    }
}
