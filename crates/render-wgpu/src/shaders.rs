/// WGSL shader for instanced crates lit by spot lights.
pub const CRATE_SHADER: &str = r#"
struct Light {
    position: vec4<f32>,
    target: vec4<f32>,
};

struct Uniforms {
    view_proj: mat4x4<f32>,
    // rgb color, w = intensity
    light_color: vec4<f32>,
    // x = cos outer cone, y = cos inner cone, z = range, w = light count
    light_params: vec4<f32>,
    // x = ambient
    ambient: vec4<f32>,
    lights: array<Light, 64>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) offset: vec4<f32>,
    @location(3) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) color: vec4<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let world_pos = vertex.position + instance.offset.xyz;

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(world_pos, 1.0);
    out.world_position = world_pos;
    out.world_normal = vertex.normal;
    out.color = instance.color;
    return out;
}

fn spot_lighting(world_pos: vec3<f32>, normal: vec3<f32>) -> vec3<f32> {
    var total = vec3<f32>(0.0, 0.0, 0.0);
    let count = min(u32(uniforms.light_params.w), 64u);
    let range = uniforms.light_params.z;
    for (var i = 0u; i < count; i = i + 1u) {
        let light = uniforms.lights[i];
        let to_light = light.position.xyz - world_pos;
        let dist = length(to_light);
        let l = to_light / max(dist, 0.0001);
        let axis = normalize(light.target.xyz - light.position.xyz);
        let cone = smoothstep(uniforms.light_params.x, uniforms.light_params.y, dot(-l, axis));
        var falloff = 1.0;
        if (range > 0.0) {
            falloff = clamp(1.0 - dist / range, 0.0, 1.0);
        }
        let diffuse = max(dot(normal, l), 0.0);
        total = total + uniforms.light_color.rgb * (uniforms.light_color.w * cone * falloff * diffuse);
    }
    return total;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let normal = normalize(in.world_normal);
    let lighting = vec3<f32>(uniforms.ambient.x) + spot_lighting(in.world_position, normal);
    return vec4<f32>(in.color.rgb * lighting, in.color.a);
}
"#;

/// WGSL shader for the floor grid.
pub const GRID_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct GridVertex {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
};

struct GridOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_grid(vertex: GridVertex) -> GridOutput {
    var out: GridOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(vertex.position, 1.0);
    out.color = vertex.color;
    return out;
}

@fragment
fn fs_grid(in: GridOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;
