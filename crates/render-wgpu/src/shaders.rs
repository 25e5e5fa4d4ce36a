/// WGSL shader for vertex-coloured geometry.
pub const SCENE_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct SceneVertex {
    @location(0) position: vec3<f32>,
    @location(1) colour: vec3<f32>,
};

struct SceneOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) colour: vec3<f32>,
};

@vertex
fn vs_scene(vertex: SceneVertex) -> SceneOutput {
    var out: SceneOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(vertex.position, 1.0);
    out.colour = vertex.colour;
    return out;
}

@fragment
fn fs_scene(in: SceneOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(in.colour, 1.0);
}
"#;
