//! # Shader Programs
//!
//! WGSL sources are embedded in the binary. [`ShaderProgram`] wraps a source
//! and reflects the names the engine needs to look up at pipeline creation:
//!
//! - vertex attributes: the `@location(n) name: type` fields of `struct VertexInput`
//! - uniforms: the fields of `struct ObjectUniforms`
//!
//! Lookups return named errors instead of sentinel values.

use crate::error::{RenderError, Result};

/// Screen-space cone shader with one fragment entry point per [`ShaderVariant`].
pub const VORONOI_WGSL: &str = include_str!("voronoi.wgsl");

/// World-space shader for vertex-colored meshes and lines.
pub const SCENE_WGSL: &str = include_str!("scene.wgsl");

const ATTRIBUTE_STRUCT: &str = "VertexInput";
const UNIFORM_STRUCT: &str = "ObjectUniforms";

/// A WGSL program plus the interface reflected from its source.
#[derive(Debug, Clone)]
pub struct ShaderProgram {
    name: String,
    source: String,
    attributes: Vec<(String, u32)>,
    uniforms: Vec<String>,
}

impl ShaderProgram {
    pub fn from_wgsl(name: &str, source: &str) -> Self {
        let source = strip_line_comments(source);

        let attributes = struct_body(&source, ATTRIBUTE_STRUCT)
            .map(reflect_locations)
            .unwrap_or_default();
        let uniforms = struct_body(&source, UNIFORM_STRUCT)
            .map(reflect_fields)
            .unwrap_or_default();

        Self {
            name: name.to_owned(),
            source,
            attributes,
            uniforms,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Location of the vertex attribute called `name`.
    pub fn attribute_location(&self, name: &str) -> Result<u32> {
        self.attributes
            .iter()
            .find(|(attribute, _)| attribute == name)
            .map(|(_, location)| *location)
            .ok_or_else(|| RenderError::ShaderAttributeNotFound {
                shader: self.name.clone(),
                name: name.to_owned(),
            })
    }

    /// Fails unless the uniform block declares a field called `name`.
    pub fn require_uniform(&self, name: &str) -> Result<()> {
        if self.uniforms.iter().any(|uniform| uniform == name) {
            Ok(())
        } else {
            Err(RenderError::UniformNotFound {
                shader: self.name.clone(),
                name: name.to_owned(),
            })
        }
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, u32)> {
        self.attributes
            .iter()
            .map(|(name, location)| (name.as_str(), *location))
    }

    pub fn uniforms(&self) -> impl Iterator<Item = &str> {
        self.uniforms.iter().map(String::as_str)
    }
}

fn strip_line_comments(source: &str) -> String {
    source
        .lines()
        .map(|line| line.split("//").next().unwrap_or(""))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Text between the braces of `struct <name> { ... }`.
fn struct_body<'a>(source: &'a str, name: &str) -> Option<&'a str> {
    let mut search_from = 0;
    while let Some(found) = source[search_from..].find("struct") {
        let after_keyword = search_from + found + "struct".len();
        let rest = &source[after_keyword..];
        let ident: String = rest
            .trim_start()
            .chars()
            .take_while(|c| c.is_alphanumeric() || *c == '_')
            .collect();

        if ident == name {
            let open = after_keyword + rest.find('{')?;
            let close = open + source[open..].find('}')?;
            return Some(&source[open + 1..close]);
        }
        search_from = after_keyword;
    }
    None
}

/// Field declarations of a struct body, split on commas outside `(..)` and `<..>`.
fn fields(body: &str) -> impl Iterator<Item = &str> {
    let mut declarations = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in body.char_indices() {
        match c {
            '(' | '<' => depth += 1,
            ')' | '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                declarations.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    declarations.push(&body[start..]);

    declarations
        .into_iter()
        .map(str::trim)
        .filter(|field| field.contains(':'))
}

/// Name of a field declaration such as `@align(16) color: vec4<f32>`.
fn field_name(field: &str) -> Option<&str> {
    let (declaration, _ty) = field.split_once(':')?;
    declaration.split_whitespace().last()
}

fn reflect_locations(body: &str) -> Vec<(String, u32)> {
    fields(body)
        .filter_map(|field| {
            let start = field.find("@location(")? + "@location(".len();
            let end = start + field[start..].find(')')?;
            let location = field[start..end].trim().parse().ok()?;
            Some((field_name(field)?.to_owned(), location))
        })
        .collect()
}

fn reflect_fields(body: &str) -> Vec<String> {
    fields(body)
        .filter_map(field_name)
        .map(str::to_owned)
        .collect()
}

/// Selectable cone shading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderVariant {
    /// Flat per-cone color.
    Color,
    /// Grayscale distance to the nearest seed.
    Distance,
    /// Per-cone color darkened with distance.
    DistanceColor,
}

impl ShaderVariant {
    pub const ALL: [ShaderVariant; 3] = [
        ShaderVariant::Color,
        ShaderVariant::Distance,
        ShaderVariant::DistanceColor,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ShaderVariant::Color => "Color",
            ShaderVariant::Distance => "Distance",
            ShaderVariant::DistanceColor => "Distance + Color",
        }
    }

    /// Render pipeline registered for this variant.
    pub fn pipeline_name(&self) -> &'static str {
        match self {
            ShaderVariant::Color => "voronoi_color",
            ShaderVariant::Distance => "voronoi_distance",
            ShaderVariant::DistanceColor => "voronoi_distance_color",
        }
    }

    /// Fragment entry point in [`VORONOI_WGSL`].
    pub fn fragment_entry(&self) -> &'static str {
        match self {
            ShaderVariant::Color => "fs_color",
            ShaderVariant::Distance => "fs_distance",
            ShaderVariant::DistanceColor => "fs_distance_color",
        }
    }
}

/// Holds the single active [`ShaderVariant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderSelector {
    active: ShaderVariant,
}

impl ShaderSelector {
    pub fn new(active: ShaderVariant) -> Self {
        Self { active }
    }

    pub fn active(&self) -> ShaderVariant {
        self.active
    }

    pub fn select(&mut self, variant: ShaderVariant) {
        self.active = variant;
    }
}

impl Default for ShaderSelector {
    fn default() -> Self {
        Self::new(ShaderVariant::Color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflects_embedded_voronoi_shader() {
        let program = ShaderProgram::from_wgsl("voronoi", VORONOI_WGSL);
        assert_eq!(program.attribute_location("position").unwrap(), 0);
        assert_eq!(program.attribute_location("color").unwrap(), 1);
        assert!(program.require_uniform("offset").is_ok());
        assert!(program.require_uniform("color").is_ok());
    }

    #[test]
    fn reflects_embedded_scene_shader() {
        let program = ShaderProgram::from_wgsl("scene", SCENE_WGSL);
        assert!(program.attribute_location("position").is_ok());
        assert!(program.require_uniform("model_view_proj").is_ok());
    }

    #[test]
    fn unknown_names_fail_with_named_errors() {
        let program = ShaderProgram::from_wgsl("scene", SCENE_WGSL);

        match program.attribute_location("aPos") {
            Err(RenderError::ShaderAttributeNotFound { shader, name }) => {
                assert_eq!(shader, "scene");
                assert_eq!(name, "aPos");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(
            program.require_uniform("light_position"),
            Err(RenderError::UniformNotFound { .. })
        ));
    }

    #[test]
    fn skips_comments_and_attributes() {
        let source = r#"
            // struct VertexInput { @location(9) ghost: f32, };
            struct ObjectUniforms {
                @align(16) tint: vec4<f32>, // trailing note: ignored
                scale: f32,
            };
            struct VertexInput {
                @location(2) @interpolate(flat) id: u32,
            };
        "#;
        let program = ShaderProgram::from_wgsl("custom", source);

        assert_eq!(program.uniforms().collect::<Vec<_>>(), vec!["tint", "scale"]);
        assert_eq!(program.attributes().collect::<Vec<_>>(), vec![("id", 2)]);
        assert!(program.attribute_location("ghost").is_err());
    }

    #[test]
    fn commas_inside_attributes_and_types_stay_in_one_field() {
        let source = r#"
            struct ObjectUniforms {
                weights: array<vec4<f32>, 4>,
                color: vec4<f32>,
            };
            struct VertexInput {
                @location(0) @interpolate(perspective, centroid) uv: vec2<f32>,
                @location(1) position: vec3<f32>,
            };
        "#;
        let program = ShaderProgram::from_wgsl("interp", source);

        assert_eq!(program.attribute_location("uv").unwrap(), 0);
        assert_eq!(program.attribute_location("position").unwrap(), 1);
        assert_eq!(program.uniforms().collect::<Vec<_>>(), vec!["weights", "color"]);
    }

    #[test]
    fn selector_switches_variant() {
        let mut selector = ShaderSelector::default();
        assert_eq!(selector.active(), ShaderVariant::Color);

        selector.select(ShaderVariant::DistanceColor);
        assert_eq!(selector.active().fragment_entry(), "fs_distance_color");
    }
}
