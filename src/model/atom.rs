use super::types::Element;

#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub atomic_number: u8,
    pub position: [f64; 3],
}

impl Atom {
    pub fn new(atomic_number: u8, position: [f64; 3]) -> Self {
        Self {
            atomic_number,
            position,
        }
    }

    /// The element for this atom, or `None` for dummy atoms (atomic number 0)
    /// and numbers beyond the periodic table.
    #[inline]
    pub fn element(&self) -> Option<Element> {
        Element::from_atomic_number(self.atomic_number)
    }

    #[inline]
    pub fn set_position(&mut self, position: [f64; 3]) {
        self.position = position;
    }

    /// An atom can be serialized only when every coordinate is finite.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.position.iter().all(|c| c.is_finite())
    }
}
