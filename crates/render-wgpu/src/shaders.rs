/// WGSL shader for gallery tiles: a unit quad scaled and offset per instance,
/// sampling its texture through a cover-fit UV transform.
pub const TILE_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(1) @binding(0)
var tile_texture: texture_2d<f32>;
@group(1) @binding(1)
var tile_sampler: sampler;

struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) uv: vec2<f32>,
};

struct InstanceInput {
    @location(2) offset: vec2<f32>,
    @location(3) scale: vec2<f32>,
    @location(4) uv_scale: vec2<f32>,
    @location(5) uv_offset: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let world = vec4<f32>(vertex.position * instance.scale + instance.offset, 0.0, 1.0);

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * world;
    out.uv = vertex.uv * instance.uv_scale + instance.uv_offset;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(tile_texture, tile_sampler, in.uv);
}
"#;
