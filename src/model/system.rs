use std::collections::BTreeMap;

use super::atom::Atom;
use super::cube::Cube;

/// Distance added to the sum of covalent radii when perceiving bonds (Å).
pub const DEFAULT_BOND_TOLERANCE: f64 = 0.45;
/// Pairs closer than this are treated as overlapping, not bonded (Å).
pub const DEFAULT_MIN_BOND_DISTANCE: f64 = 0.32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub i: usize,
    pub j: usize,
}

impl Bond {
    pub fn new(idx1: usize, idx2: usize) -> Self {
        if idx1 <= idx2 {
            Self { i: idx1, j: idx2 }
        } else {
            Self { i: idx2, j: idx1 }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct System {
    pub atoms: Vec<Atom>,
    pub bonds: Vec<Bond>,
    pub cubes: Vec<Cube>,
    pub data: BTreeMap<String, String>,
}

impl System {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an atom at the origin and returns it for positioning.
    pub fn add_atom(&mut self, atomic_number: u8) -> &mut Atom {
        self.atoms.push(Atom::new(atomic_number, [0.0; 3]));
        let last = self.atoms.len() - 1;
        &mut self.atoms[last]
    }

    #[inline]
    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn set_data(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.data.insert(key.into(), value.into());
    }

    #[inline]
    pub fn data(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    /// Appends an empty grid and returns it for configuration.
    pub fn add_cube(&mut self) -> &mut Cube {
        self.cubes.push(Cube::new());
        let last = self.cubes.len() - 1;
        &mut self.cubes[last]
    }

    #[inline]
    pub fn cube(&self, index: usize) -> Option<&Cube> {
        self.cubes.get(index)
    }

    #[inline]
    pub fn cube_mut(&mut self, index: usize) -> Option<&mut Cube> {
        self.cubes.get_mut(index)
    }

    #[inline]
    pub fn cube_count(&self) -> usize {
        self.cubes.len()
    }

    /// Replaces the bond list with bonds inferred from interatomic distances
    /// using the default tolerances.
    pub fn perceive_bonds_simple(&mut self) {
        self.perceive_bonds_simple_with(DEFAULT_BOND_TOLERANCE, DEFAULT_MIN_BOND_DISTANCE);
    }

    /// Connects every pair of known-element atoms whose separation lies in
    /// `(min_distance, r_a + r_b + tolerance)`.
    ///
    /// O(n^2); cube files rarely carry more than a few hundred atoms.
    pub fn perceive_bonds_simple_with(&mut self, tolerance: f64, min_distance: f64) {
        self.bonds.clear();

        let radii: Vec<Option<f64>> = self
            .atoms
            .iter()
            .map(|atom| atom.element().map(|e| e.covalent_radius()))
            .collect();
        let min_sq = min_distance * min_distance;

        for i in 0..self.atoms.len() {
            let Some(r_i) = radii[i] else {
                continue;
            };
            for j in (i + 1)..self.atoms.len() {
                let Some(r_j) = radii[j] else {
                    continue;
                };
                let cutoff = r_i + r_j + tolerance;
                let dist_sq = distance_sq(&self.atoms[i].position, &self.atoms[j].position);
                if dist_sq > min_sq && dist_sq < cutoff * cutoff {
                    self.bonds.push(Bond::new(i, j));
                }
            }
        }
    }
}

fn distance_sq(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water() -> System {
        let mut system = System::new();
        system.add_atom(8).set_position([0.0, 0.0, 0.0]);
        system.add_atom(1).set_position([0.757, 0.586, 0.0]);
        system.add_atom(1).set_position([-0.757, 0.586, 0.0]);
        system
    }

    #[test]
    fn bond_new_orders_indices() {
        assert_eq!(Bond::new(3, 1), Bond { i: 1, j: 3 });
        assert_eq!(Bond::new(1, 3), Bond { i: 1, j: 3 });
    }

    #[test]
    fn add_atom_and_lookup() {
        let system = water();
        assert_eq!(system.atom_count(), 3);
        assert_eq!(system.atom(0).map(|a| a.atomic_number), Some(8));
        assert_eq!(system.atom(1).map(|a| a.position), Some([0.757, 0.586, 0.0]));
        assert!(system.atom(3).is_none());
    }

    #[test]
    fn data_store_roundtrip() {
        let mut system = System::new();
        assert_eq!(system.data("name"), None);
        system.set_data("name", "benzene");
        assert_eq!(system.data("name"), Some("benzene"));
        system.set_data("name", "toluene");
        assert_eq!(system.data("name"), Some("toluene"));
    }

    #[test]
    fn add_cube_and_lookup() {
        let mut system = System::new();
        system.add_cube().set_limits([0.0; 3], [1, 1, 1], [1.0; 3]);
        system.add_cube();
        assert_eq!(system.cube_count(), 2);
        assert_eq!(system.cube(0).map(|c| c.dimensions()), Some([1, 1, 1]));
        assert!(system.cube_mut(1).is_some());
        assert!(system.cube(2).is_none());
    }

    #[test]
    fn perceives_water_bonds() {
        let mut system = water();
        system.perceive_bonds_simple();
        assert_eq!(system.bonds, vec![Bond::new(0, 1), Bond::new(0, 2)]);
    }

    #[test]
    fn far_atoms_are_not_bonded() {
        let mut system = System::new();
        system.add_atom(6).set_position([0.0, 0.0, 0.0]);
        system.add_atom(6).set_position([5.0, 0.0, 0.0]);
        system.perceive_bonds_simple();
        assert!(system.bonds.is_empty());
    }

    #[test]
    fn overlapping_and_dummy_atoms_are_not_bonded() {
        let mut system = System::new();
        system.add_atom(6).set_position([0.0, 0.0, 0.0]);
        system.add_atom(6).set_position([0.1, 0.0, 0.0]);
        system.add_atom(0).set_position([1.0, 0.0, 0.0]);
        system.perceive_bonds_simple();
        assert!(system.bonds.is_empty());
    }

    #[test]
    fn perception_replaces_existing_bonds() {
        let mut system = water();
        system.bonds.push(Bond::new(1, 2));
        system.perceive_bonds_simple();
        assert!(!system.bonds.contains(&Bond::new(1, 2)));
        assert_eq!(system.bond_count(), 2);
    }
}
