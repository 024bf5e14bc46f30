// draw.rs - Draw commands and the per-primitive helpers that build them
use glam::{Mat4, Vec3};

use crate::material::{Material, WINDOW_ALPHA};
use crate::mesh::MeshKind;

/// How a draw command is shaded
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shading {
    /// Phong lighting with the command's material
    Lit,
    /// Flat color, ignores lights
    Emissive(Vec3),
    /// Phong lighting sampling the texture in the given slot
    Textured(usize),
}

/// One positioned primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub mesh: MeshKind,
    pub model: Mat4,
    pub material: Material,
    pub shading: Shading,
}

impl DrawCommand {
    pub fn is_translucent(&self) -> bool {
        matches!(self.shading, Shading::Lit) && self.material.is_translucent()
    }
}

/// Optional rotation applied between translation and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub degrees: f32,
    pub axis: Vec3,
}

impl Rotation {
    pub const fn about_x(degrees: f32) -> Self {
        Self { degrees, axis: Vec3::X }
    }

    pub const fn about_y(degrees: f32) -> Self {
        Self { degrees, axis: Vec3::Y }
    }
}

/// translate · rotate · scale, skipping a zero-angle rotation
pub fn model_matrix(position: Vec3, scale: Vec3, rotation: Option<Rotation>) -> Mat4 {
    let mut model = Mat4::from_translation(position);
    if let Some(rotation) = rotation {
        if rotation.degrees != 0.0 {
            let axis = rotation.axis.try_normalize().unwrap_or(Vec3::Y);
            model *= Mat4::from_axis_angle(axis, rotation.degrees.to_radians());
        }
    }
    model * Mat4::from_scale(scale)
}

/// Ordered list of draw commands for one frame
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Opaque commands first, then translucent ones, each in insertion order
    pub fn ordered_for_blending(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| !c.is_translucent())
            .chain(self.commands.iter().filter(|c| c.is_translucent()))
    }

    fn lit(&mut self, mesh: MeshKind, model: Mat4, material: Material) {
        self.push(DrawCommand {
            mesh,
            model,
            material,
            shading: Shading::Lit,
        });
    }

    pub fn cube(&mut self, position: Vec3, scale: Vec3, material: Material) {
        self.cube_rotated(position, scale, material, 0.0);
    }

    /// Cube rotated about Y
    pub fn cube_rotated(&mut self, position: Vec3, scale: Vec3, material: Material, degrees: f32) {
        let model = model_matrix(position, scale, Some(Rotation::about_y(degrees)));
        self.lit(MeshKind::Cube, model, material);
    }

    pub fn cube_with_matrix(&mut self, transform: Mat4, scale: Vec3, material: Material) {
        self.lit(MeshKind::Cube, transform * Mat4::from_scale(scale), material);
    }

    /// Plane rotated about X
    pub fn plane(&mut self, position: Vec3, scale: Vec3, material: Material, degrees: f32) {
        let model = model_matrix(position, scale, Some(Rotation::about_x(degrees)));
        self.lit(MeshKind::Plane, model, material);
    }

    pub fn cylinder(&mut self, position: Vec3, scale: Vec3, material: Material) {
        self.cylinder_rotated(position, scale, material, Rotation::about_x(0.0));
    }

    pub fn cylinder_rotated(
        &mut self,
        position: Vec3,
        scale: Vec3,
        material: Material,
        rotation: Rotation,
    ) {
        let model = model_matrix(position, scale, Some(rotation));
        self.lit(MeshKind::Cylinder, model, material);
    }

    pub fn cylinder_with_matrix(&mut self, transform: Mat4, scale: Vec3, material: Material) {
        self.lit(MeshKind::Cylinder, transform * Mat4::from_scale(scale), material);
    }

    pub fn sphere(&mut self, position: Vec3, scale: Vec3, material: Material) {
        self.lit(MeshKind::Sphere, model_matrix(position, scale, None), material);
    }

    /// Window mesh rotated about Y, glazed at `WINDOW_ALPHA`
    pub fn window(&mut self, position: Vec3, scale: Vec3, material: Material, degrees: f32) {
        self.window_with_material(position, scale, material.with_alpha(WINDOW_ALPHA), degrees);
    }

    /// Window mesh keeping the material's own alpha
    pub fn window_with_material(
        &mut self,
        position: Vec3,
        scale: Vec3,
        material: Material,
        degrees: f32,
    ) {
        let model = model_matrix(position, scale, Some(Rotation::about_y(degrees)));
        self.lit(MeshKind::Window, model, material);
    }

    pub fn emissive_cube(&mut self, position: Vec3, scale: Vec3, color: Vec3) {
        self.emissive(MeshKind::Cube, model_matrix(position, scale, None), color);
    }

    pub fn emissive_sphere(&mut self, position: Vec3, scale: Vec3, color: Vec3) {
        self.emissive(MeshKind::Sphere, model_matrix(position, scale, None), color);
    }

    fn emissive(&mut self, mesh: MeshKind, model: Mat4, color: Vec3) {
        self.push(DrawCommand {
            mesh,
            model,
            material: Material::new(color, color, Vec3::ZERO),
            shading: Shading::Emissive(color),
        });
    }

    pub fn textured_plane(
        &mut self,
        position: Vec3,
        scale: Vec3,
        rotation: Rotation,
        material: Material,
        slot: usize,
    ) {
        self.push(DrawCommand {
            mesh: MeshKind::Plane,
            model: model_matrix(position, scale, Some(rotation)),
            material,
            shading: Shading::Textured(slot),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::palette;

    fn approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_model_matrix_scales_before_translating() {
        let m = model_matrix(Vec3::new(1.0, 2.0, 3.0), Vec3::new(2.0, 4.0, 6.0), None);
        let p = m.transform_point3(Vec3::splat(0.5));
        assert!(approx_eq(p, Vec3::new(2.0, 4.0, 6.0)));
    }

    #[test]
    fn test_zero_rotation_is_skipped() {
        let scale = Vec3::new(2.0, 1.0, 1.0);
        let plain = model_matrix(Vec3::ZERO, scale, None);
        let rotated = model_matrix(Vec3::ZERO, scale, Some(Rotation::about_y(0.0)));
        assert_eq!(plain, rotated);
    }

    #[test]
    fn test_rotation_applied_after_scale() {
        // Width along local X ends up along world -Z after a 90 degree turn about Y
        let m = model_matrix(Vec3::ZERO, Vec3::new(10.0, 1.0, 1.0), Some(Rotation::about_y(90.0)));
        let p = m.transform_point3(Vec3::new(0.5, 0.0, 0.0));
        assert!(approx_eq(p, Vec3::new(0.0, 0.0, -5.0)));
    }

    #[test]
    fn test_with_matrix_appends_scale() {
        let mut list = DrawList::new();
        let transform = Mat4::from_translation(Vec3::X);
        list.cube_with_matrix(transform, Vec3::splat(2.0), palette::WOOD);
        let p = list.commands()[0].model.transform_point3(Vec3::splat(0.5));
        assert!(approx_eq(p, Vec3::new(2.0, 1.0, 1.0)));
    }

    #[test]
    fn test_translucent_drawn_last() {
        let mut list = DrawList::new();
        list.window(Vec3::ZERO, Vec3::ONE, palette::WINDOW, 90.0);
        list.cube(Vec3::ZERO, Vec3::ONE, palette::WOOD);
        list.emissive_cube(Vec3::ZERO, Vec3::ONE, Vec3::ONE);

        let order: Vec<MeshKind> = list.ordered_for_blending().map(|c| c.mesh).collect();
        assert_eq!(order, vec![MeshKind::Cube, MeshKind::Cube, MeshKind::Window]);
    }

    #[test]
    fn test_window_is_glazed_by_default() {
        let mut list = DrawList::new();
        list.window(Vec3::ZERO, Vec3::ONE, palette::WOOD, 0.0);
        list.window_with_material(Vec3::ZERO, Vec3::ONE, palette::WOOD, 0.0);

        let glazed = &list.commands()[0];
        assert_eq!(glazed.material.alpha, WINDOW_ALPHA);
        assert_eq!(glazed.material.alpha, 0.3);
        assert!(glazed.is_translucent());
        assert_eq!(glazed.material.diffuse, palette::WOOD.diffuse);

        let solid = &list.commands()[1];
        assert_eq!(solid.material.alpha, 1.0);
        assert!(!solid.is_translucent());
    }

    #[test]
    fn test_emissive_never_translucent() {
        let mut list = DrawList::new();
        list.emissive_sphere(Vec3::ZERO, Vec3::splat(5.0), Vec3::new(1.0, 1.0, 0.8));
        assert!(!list.commands()[0].is_translucent());
        assert_eq!(list.commands()[0].shading, Shading::Emissive(Vec3::new(1.0, 1.0, 0.8)));
    }
}
