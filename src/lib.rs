use swc_core::{
    ecma::{ast::Program, visit::VisitMutWith},
    plugin::{plugin_transform, proxies::TransformPluginProgramMetadata},
};

mod classes;
mod error;
mod normalize;
mod scale;
mod transform;
mod value;

pub use classes::{
    class_prefix, is_spacing_property, synthesize, PropertyDescriptor, BREAKPOINTS, PROPERTIES,
};
pub use error::{Result, SpacingError};
pub use normalize::{normalize, normalize_number, normalize_text};
pub use scale::{length_to_px, scale, ScaleEntry, ScaleTable, SCALE};
pub use transform::{PluginConfig, SpacingTransform};
pub use value::{Scalar, SpacingValue};

// -----------------------------------------------------------------------------
// Entrypoint
// -----------------------------------------------------------------------------

#[plugin_transform]
pub fn process_transform(
    mut program: Program,
    metadata: TransformPluginProgramMetadata,
) -> Program {
    let config = metadata
        .get_transform_plugin_config()
        .map(|s| PluginConfig::from_json(&s))
        .unwrap_or_default();

    let mut transform = SpacingTransform::new(config);
    program.visit_mut_with(&mut transform);

    program
}
