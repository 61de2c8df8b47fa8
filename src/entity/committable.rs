use super::Entity;

/// Trait for types that can be committed to a repository.
pub trait Committable {
    /// Returns mutable references to all entities to be committed.
    fn entities_mut(&mut self) -> Vec<&mut Entity>;
}

impl Committable for Entity {
    fn entities_mut(&mut self) -> Vec<&mut Entity> {
        vec![self]
    }
}

impl<'a> Committable for [&'a mut Entity] {
    fn entities_mut(&mut self) -> Vec<&mut Entity> {
        self.iter_mut().map(|e| &mut **e).collect()
    }
}

impl<'a> Committable for Vec<&'a mut Entity> {
    fn entities_mut(&mut self) -> Vec<&mut Entity> {
        self.iter_mut().map(|e| &mut **e).collect()
    }
}
