//! Emissive-only materials for gizmo handles
//!
//! Handles are drawn unlit so their axis colour reads the same under any
//! scene lighting. Hover and armed feedback scale the emissive colour, and
//! the default dim (x0.5) and restore (x2.0) factors are exact inverses in
//! binary floating point.

/// Index of a material inside a [`MaterialManager`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub usize);

/// Unlit material: the emissive colour is the final colour
#[derive(Debug, Clone, PartialEq)]
pub struct EmissiveMaterial {
    pub name: String,
    pub emissive: [f32; 3],
}

impl Default for EmissiveMaterial {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            emissive: [1.0, 1.0, 1.0],
        }
    }
}

impl EmissiveMaterial {
    pub fn new(name: &str, emissive: [f32; 3]) -> Self {
        Self {
            name: name.to_string(),
            emissive,
        }
    }

    /// Builder pattern: Set emissive color
    pub fn with_emission(mut self, r: f32, g: f32, b: f32) -> Self {
        self.emissive = [r, g, b];
        self
    }

    /// Multiply every emissive channel by `factor`
    pub fn scale(&mut self, factor: f32) {
        for channel in &mut self.emissive {
            *channel *= factor;
        }
    }

    /// Halve the colour: hovered or armed
    pub fn dim(&mut self) {
        self.scale(0.5);
    }

    /// Undo one [`dim`](Self::dim)
    pub fn restore(&mut self) {
        self.scale(2.0);
    }
}

/// Owns every overlay material; meshes refer to them by [`MaterialId`]
#[derive(Debug, Default)]
pub struct MaterialManager {
    materials: Vec<EmissiveMaterial>,
}

impl MaterialManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a material and returns its id
    pub fn add_material(&mut self, material: EmissiveMaterial) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    pub fn get_material(&self, id: MaterialId) -> Option<&EmissiveMaterial> {
        self.materials.get(id.0)
    }

    pub fn get_material_mut(&mut self, id: MaterialId) -> Option<&mut EmissiveMaterial> {
        self.materials.get_mut(id.0)
    }

    /// Emissive colour for `id`, white when the id is unknown
    pub fn emissive_of(&self, id: MaterialId) -> [f32; 3] {
        self.get_material(id)
            .map(|m| m.emissive)
            .unwrap_or([1.0, 1.0, 1.0])
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dim_then_restore_round_trips() {
        for color in [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.3, 0.7, 0.11]] {
            let mut material = EmissiveMaterial::new("axis", color);
            material.dim();
            assert_ne!(material.emissive, color);
            material.restore();

            for (got, want) in material.emissive.iter().zip(color.iter()) {
                assert!((got - want).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_manager_hands_out_sequential_ids() {
        let mut manager = MaterialManager::new();
        let red = manager.add_material(EmissiveMaterial::new("red", [1.0, 0.0, 0.0]));
        let green = manager.add_material(EmissiveMaterial::default().with_emission(0.0, 1.0, 0.0));

        assert_eq!(red, MaterialId(0));
        assert_eq!(green, MaterialId(1));
        assert_eq!(manager.len(), 2);
        assert_eq!(manager.emissive_of(green), [0.0, 1.0, 0.0]);
        assert_eq!(manager.emissive_of(MaterialId(7)), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_scale_through_manager() {
        let mut manager = MaterialManager::new();
        let id = manager.add_material(EmissiveMaterial::new("blue", [0.0, 0.0, 1.0]));
        if let Some(material) = manager.get_material_mut(id) {
            material.scale(0.25);
        }

        assert_eq!(manager.emissive_of(id), [0.0, 0.0, 0.25]);
    }
}
