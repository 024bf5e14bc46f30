// lighting.rs - Per-frame light uniforms (sun, ceiling lights, projector spotlight)
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::config::SceneConfig;
use crate::scene::SceneState;

pub const POINT_LIGHT_COUNT: usize = 4;

const POINT_ATTENUATION: [f32; 3] = [1.0, 0.045, 0.0075];
const SPOT_ATTENUATION: [f32; 3] = [1.0, 0.014, 0.0007];
const SPOT_INNER_DEGREES: f32 = 10.0;
const SPOT_OUTER_DEGREES: f32 = 13.0;

fn vec4(v: Vec3, w: f32) -> [f32; 4] {
    [v.x, v.y, v.z, w]
}

fn attenuation(terms: [f32; 3]) -> [f32; 4] {
    [terms[0], terms[1], terms[2], 0.0]
}

/// View-projection and eye position, bind group 0 binding 0
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view_pos: [f32; 4],
}

impl CameraUniform {
    pub fn new(view_proj: Mat4, eye: Vec3) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            view_pos: vec4(eye, 1.0),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, Pod, Zeroable)]
pub struct DirLightUniform {
    pub direction: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
}

/// Attenuation is (constant, linear, quadratic, _)
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, Pod, Zeroable)]
pub struct PointLightUniform {
    pub position: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub attenuation: [f32; 4],
}

/// Cutoff is (cos inner, cos outer, _, _)
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, Pod, Zeroable)]
pub struct SpotLightUniform {
    pub position: [f32; 4],
    pub direction: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub attenuation: [f32; 4],
    pub cutoff: [f32; 4],
}

/// Everything the lit fragment shaders read, bind group 0 binding 1
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, Pod, Zeroable)]
pub struct LightingUniform {
    pub dir_light: DirLightUniform,
    pub point_lights: [PointLightUniform; POINT_LIGHT_COUNT],
    pub spot_light: SpotLightUniform,
    /// x = specular exponent, y = poster exponent
    pub shininess: [f32; 4],
}

impl LightingUniform {
    pub fn new(config: &SceneConfig, state: &SceneState) -> Self {
        let lighting = &config.lighting;
        let mut point_lights = [PointLightUniform::default(); POINT_LIGHT_COUNT];
        for (light, position) in point_lights.iter_mut().zip(lighting.ceiling_lights) {
            *light = point_light(position, state.lights_on);
        }

        Self {
            dir_light: sun_light(state.sun_position()),
            point_lights,
            spot_light: projector_light(config.projector.position, lighting.spot_target, state.projector_on),
            shininess: [lighting.shininess, lighting.poster_shininess, 0.0, 0.0],
        }
    }
}

/// Sunlight shines from the sun toward the origin
pub fn sun_light(sun_position: Vec3) -> DirLightUniform {
    let direction = (Vec3::ZERO - sun_position).try_normalize().unwrap_or(Vec3::NEG_Y);
    DirLightUniform {
        direction: vec4(direction, 0.0),
        ambient: vec4(Vec3::splat(0.3), 0.0),
        diffuse: vec4(Vec3::new(0.8, 0.8, 0.7), 0.0),
        specular: vec4(Vec3::splat(0.5), 0.0),
    }
}

pub fn point_light(position: Vec3, on: bool) -> PointLightUniform {
    let (ambient, diffuse, specular) = if on {
        (Vec3::splat(0.2), Vec3::splat(0.8), Vec3::ONE)
    } else {
        (Vec3::ZERO, Vec3::ZERO, Vec3::ZERO)
    };
    PointLightUniform {
        position: vec4(position, 1.0),
        ambient: vec4(ambient, 0.0),
        diffuse: vec4(diffuse, 0.0),
        specular: vec4(specular, 0.0),
        attenuation: attenuation(POINT_ATTENUATION),
    }
}

/// Bluish cone from the projector lens onto the screen
pub fn projector_light(position: Vec3, target: Vec3, on: bool) -> SpotLightUniform {
    let direction = (target - position).try_normalize().unwrap_or(Vec3::Z);
    let (diffuse, specular) = if on {
        (Vec3::new(1.5, 1.8, 4.0), Vec3::new(2.0, 2.5, 4.5))
    } else {
        (Vec3::ZERO, Vec3::ZERO)
    };
    SpotLightUniform {
        position: vec4(position, 1.0),
        direction: vec4(direction, 0.0),
        ambient: [0.0; 4],
        diffuse: vec4(diffuse, 0.0),
        specular: vec4(specular, 0.0),
        attenuation: attenuation(SPOT_ATTENUATION),
        cutoff: [
            SPOT_INNER_DEGREES.to_radians().cos(),
            SPOT_OUTER_DEGREES.to_radians().cos(),
            0.0,
            0.0,
        ],
    }
}
