// mesh.rs - Procedural geometry for the scene primitives
use glam::{Vec2, Vec3};
use std::f32::consts::PI;

const SPHERE_SECTORS: u32 = 32;
const SPHERE_STACKS: u32 = 16;
const CYLINDER_SEGMENTS: u32 = 32;

const WINDOW_DEPTH: f32 = 0.02;
const WINDOW_FRAME_WIDTH: f32 = 0.08;

/// GPU vertex: position, normal, texture coordinate
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    pub fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv: uv.to_array(),
        }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Primitive shapes the scene is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Cube,
    Plane,
    Sphere,
    Cylinder,
    Window,
    Tetrahedron,
    Pentahedron,
}

impl MeshKind {
    pub const ALL: [MeshKind; 7] = [
        MeshKind::Cube,
        MeshKind::Plane,
        MeshKind::Sphere,
        MeshKind::Cylinder,
        MeshKind::Window,
        MeshKind::Tetrahedron,
        MeshKind::Pentahedron,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MeshKind::Cube => "Cube",
            MeshKind::Plane => "Plane",
            MeshKind::Sphere => "Sphere",
            MeshKind::Cylinder => "Cylinder",
            MeshKind::Window => "Window",
            MeshKind::Tetrahedron => "Tetrahedron",
            MeshKind::Pentahedron => "Pentahedron",
        }
    }
}

/// Generate the triangle list for a primitive
pub fn vertices(kind: MeshKind) -> Vec<Vertex> {
    match kind {
        MeshKind::Cube => cube(),
        MeshKind::Plane => plane(),
        MeshKind::Sphere => sphere(SPHERE_SECTORS, SPHERE_STACKS),
        MeshKind::Cylinder => cylinder(CYLINDER_SEGMENTS),
        MeshKind::Window => window(),
        MeshKind::Tetrahedron => tetrahedron(),
        MeshKind::Pentahedron => pentahedron(),
    }
}

/// Number of vertices `vertices(kind)` produces
pub const fn vertex_count(kind: MeshKind) -> u32 {
    match kind {
        MeshKind::Cube => 36,
        MeshKind::Plane => 6,
        MeshKind::Sphere => SPHERE_SECTORS * SPHERE_STACKS * 6,
        MeshKind::Cylinder => CYLINDER_SEGMENTS * 12,
        MeshKind::Window => 16 * 6,
        MeshKind::Tetrahedron => 12,
        MeshKind::Pentahedron => 24,
    }
}

/// Push two triangles (p1, p2, p3) and (p1, p3, p4) sharing one normal
fn push_quad(out: &mut Vec<Vertex>, corners: [Vec3; 4], normal: Vec3, uvs: [Vec2; 4]) {
    for i in [0, 1, 2, 0, 2, 3] {
        out.push(Vertex::new(corners[i], normal, uvs[i]));
    }
}

/// Push a triangle with a face normal derived from its winding
fn push_flat_triangle(out: &mut Vec<Vertex>, corners: [Vec3; 3], uvs: [Vec2; 3]) {
    let normal = (corners[1] - corners[0])
        .cross(corners[2] - corners[0])
        .normalize_or_zero();
    for i in 0..3 {
        out.push(Vertex::new(corners[i], normal, uvs[i]));
    }
}

fn cube() -> Vec<Vertex> {
    // (normal, tangent u, tangent v) per face
    let faces = [
        (Vec3::NEG_Z, Vec3::X, Vec3::Y),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::X, Vec3::Z, Vec3::Y),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Y, Vec3::X, Vec3::Z),
    ];

    let mut out = Vec::with_capacity(36);
    for (normal, u, v) in faces {
        let center = normal * 0.5;
        let corners = [
            center - u * 0.5 - v * 0.5,
            center + u * 0.5 - v * 0.5,
            center + u * 0.5 + v * 0.5,
            center - u * 0.5 + v * 0.5,
        ];
        push_quad(&mut out, corners, normal, unit_uvs());
    }
    out
}

fn unit_uvs() -> [Vec2; 4] {
    [
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(0.0, 1.0),
    ]
}

fn plane() -> Vec<Vertex> {
    let mut out = Vec::with_capacity(6);
    push_quad(
        &mut out,
        [
            Vec3::new(0.5, 0.0, 0.5),
            Vec3::new(-0.5, 0.0, 0.5),
            Vec3::new(-0.5, 0.0, -0.5),
            Vec3::new(0.5, 0.0, -0.5),
        ],
        Vec3::Y,
        [
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
        ],
    );
    out
}

/// UV sphere of unit radius; the normal of each vertex is its position
fn sphere(sectors: u32, stacks: u32) -> Vec<Vertex> {
    let point = |u: f32, v: f32| {
        let theta = u * 2.0 * PI;
        let phi = v * PI;
        Vec3::new(theta.cos() * phi.sin(), phi.cos(), theta.sin() * phi.sin())
    };

    let mut out = Vec::with_capacity((sectors * stacks * 6) as usize);
    for y in 0..stacks {
        for x in 0..sectors {
            let u0 = x as f32 / sectors as f32;
            let u1 = (x + 1) as f32 / sectors as f32;
            let v0 = y as f32 / stacks as f32;
            let v1 = (y + 1) as f32 / stacks as f32;

            let corners = [point(u0, v0), point(u1, v0), point(u1, v1), point(u0, v1)];
            let uvs = [
                Vec2::new(u0, v0),
                Vec2::new(u1, v0),
                Vec2::new(u1, v1),
                Vec2::new(u0, v1),
            ];
            for i in [0, 1, 2, 0, 2, 3] {
                out.push(Vertex::new(corners[i], corners[i], uvs[i]));
            }
        }
    }
    out
}

/// Cylinder of radius 0.5 and height 1 centered on the origin, axis along Y
fn cylinder(segments: u32) -> Vec<Vertex> {
    let radius = 0.5;
    let half = 0.5;
    let mut out = Vec::with_capacity((segments * 12) as usize);

    for i in 0..segments {
        let t0 = i as f32 / segments as f32;
        let t1 = (i + 1) as f32 / segments as f32;
        let (s0, c0) = (t0 * 2.0 * PI).sin_cos();
        let (s1, c1) = (t1 * 2.0 * PI).sin_cos();

        let p0 = Vec3::new(c0 * radius, 0.0, s0 * radius);
        let p1 = Vec3::new(c1 * radius, 0.0, s1 * radius);
        let cap_uv = |p: Vec3| Vec2::new(0.5 + p.x, 0.5 + p.z);

        // Top cap
        out.push(Vertex::new(Vec3::new(0.0, half, 0.0), Vec3::Y, Vec2::splat(0.5)));
        out.push(Vertex::new(p0 + Vec3::Y * half, Vec3::Y, cap_uv(p0)));
        out.push(Vertex::new(p1 + Vec3::Y * half, Vec3::Y, cap_uv(p1)));

        // Bottom cap
        out.push(Vertex::new(Vec3::new(0.0, -half, 0.0), Vec3::NEG_Y, Vec2::splat(0.5)));
        out.push(Vertex::new(p1 - Vec3::Y * half, Vec3::NEG_Y, cap_uv(p1)));
        out.push(Vertex::new(p0 - Vec3::Y * half, Vec3::NEG_Y, cap_uv(p0)));

        // Side
        let n0 = Vec3::new(c0, 0.0, s0);
        let n1 = Vec3::new(c1, 0.0, s1);
        let bottom0 = Vertex::new(p0 - Vec3::Y * half, n0, Vec2::new(t0, 0.0));
        let top0 = Vertex::new(p0 + Vec3::Y * half, n0, Vec2::new(t0, 1.0));
        let top1 = Vertex::new(p1 + Vec3::Y * half, n1, Vec2::new(t1, 1.0));
        let bottom1 = Vertex::new(p1 - Vec3::Y * half, n1, Vec2::new(t1, 0.0));
        out.extend_from_slice(&[bottom0, top0, top1, bottom0, top1, bottom1]);
    }
    out
}

/// 1x1 window in the XY plane facing +Z: frame bars on both faces and a 2x2 grid of panes
fn window() -> Vec<Vertex> {
    let hw = 0.5;
    let hh = 0.5;
    let fw = WINDOW_FRAME_WIDTH;
    let hfw = fw * 0.5;
    let hd = WINDOW_DEPTH * 0.5;

    // (min x, min y, max x, max y) of every frame bar
    let bars = [
        (-hw, hh - fw, hw, hh),
        (-hw, -hh, hw, -hh + fw),
        (-hw, -hh + fw, -hw + fw, hh - fw),
        (hw - fw, -hh + fw, hw, hh - fw),
        (-hfw, -hh + fw, hfw, hh - fw),
        (-hw + fw, -hfw, hw - fw, hfw),
    ];

    let mut out = Vec::with_capacity(96);
    for (x0, y0, x1, y1) in bars {
        push_quad(
            &mut out,
            [
                Vec3::new(x0, y0, hd),
                Vec3::new(x1, y0, hd),
                Vec3::new(x1, y1, hd),
                Vec3::new(x0, y1, hd),
            ],
            Vec3::Z,
            unit_uvs(),
        );
    }
    for (x0, y0, x1, y1) in bars {
        push_quad(
            &mut out,
            [
                Vec3::new(x0, y1, -hd),
                Vec3::new(x1, y1, -hd),
                Vec3::new(x1, y0, -hd),
                Vec3::new(x0, y0, -hd),
            ],
            Vec3::NEG_Z,
            [
                Vec2::new(0.0, 1.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(0.0, 0.0),
            ],
        );
    }

    let panes = [
        (-hw + fw, hfw, -hfw, hh - fw),
        (hfw, hfw, hw - fw, hh - fw),
        (-hw + fw, -hh + fw, -hfw, -hfw),
        (hfw, -hh + fw, hw - fw, -hfw),
    ];
    for (x0, y0, x1, y1) in panes {
        let uv = |x: f32, y: f32| Vec2::new(x + 0.5, y + 0.5);
        push_quad(
            &mut out,
            [
                Vec3::new(x0, y0, 0.0),
                Vec3::new(x1, y0, 0.0),
                Vec3::new(x1, y1, 0.0),
                Vec3::new(x0, y1, 0.0),
            ],
            Vec3::Z,
            [uv(x0, y0), uv(x1, y0), uv(x1, y1), uv(x0, y1)],
        );
    }
    out
}

fn tetrahedron() -> Vec<Vertex> {
    let apex = Vec3::new(0.0, 0.577, 0.0);
    let a = Vec3::new(-0.5, -0.289, 0.5);
    let b = Vec3::new(0.5, -0.289, 0.5);
    let c = Vec3::new(0.0, -0.289, -0.5);
    let side_uvs = [Vec2::new(0.5, 1.0), Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)];

    let mut out = Vec::with_capacity(12);
    push_flat_triangle(&mut out, [apex, a, b], side_uvs);
    push_flat_triangle(&mut out, [apex, b, c], side_uvs);
    push_flat_triangle(&mut out, [apex, c, a], side_uvs);
    push_flat_triangle(
        &mut out,
        [a, c, b],
        [Vec2::new(0.0, 1.0), Vec2::new(0.5, 0.0), Vec2::new(1.0, 1.0)],
    );
    out
}

/// Triangular prism: ridge along Z at the top, square base
fn pentahedron() -> Vec<Vertex> {
    let ridge_front = Vec3::new(0.0, 0.5, 0.5);
    let ridge_back = Vec3::new(0.0, 0.5, -0.5);
    let lf = Vec3::new(-0.5, -0.5, 0.5);
    let rf = Vec3::new(0.5, -0.5, 0.5);
    let lb = Vec3::new(-0.5, -0.5, -0.5);
    let rb = Vec3::new(0.5, -0.5, -0.5);
    let end_uvs = [Vec2::new(0.5, 1.0), Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)];

    let mut out = Vec::with_capacity(24);
    push_flat_triangle(&mut out, [ridge_front, lf, rf], end_uvs);
    push_flat_triangle(&mut out, [ridge_back, rb, lb], end_uvs);

    let quads = [
        [lb, lf, ridge_front, ridge_back],
        [rf, rb, ridge_back, ridge_front],
        [lb, rb, rf, lf],
    ];
    for corners in quads {
        let normal = (corners[1] - corners[0])
            .cross(corners[2] - corners[0])
            .normalize_or_zero();
        push_quad(&mut out, corners, normal, unit_uvs());
    }
    out
}
