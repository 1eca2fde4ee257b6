use std::cell::Cell;
use std::ops;


// A value together with a "needs redraw" flag. Renderers check `take_dirt` and skip the frame
// when nothing changed since the last one.
#[derive(Clone, Debug)]
pub struct Dirty<T> {
    value: T,
    dirty: Cell<bool>,
}

impl<T> Dirty<T> {
    // Starts dirty: the first frame is always drawn.
    pub fn new(value: T) -> Self { Self { value, dirty: Cell::new(true) } }

    pub fn get_mut(&mut self) -> &mut T {
        self.dirty.set(true);
        &mut self.value
    }

    pub fn mark_dirty(&self) { self.dirty.set(true); }
    pub fn take_dirt(&self) -> bool { self.dirty.replace(false) }
}

impl<T: PartialEq> Dirty<T> {
    // Only a real change marks the value dirty. Polling re-applies identical documents every
    // tick, and those must not cause a redraw.
    pub fn set(&mut self, value: T) {
        if self.value != value {
            self.value = value;
            self.dirty.set(true);
        }
    }
}

impl<T> ops::Deref for Dirty<T> {
    type Target = T;
    fn deref(&self) -> &Self::Target { &self.value }
}
// Don't implement `DerefMut`. A call to `get_mut` stresses the fact that it sets the dirty flag.


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_changes_are_dirty() {
        let mut v = Dirty::new(1);
        assert!(v.take_dirt());
        assert!(!v.take_dirt());
        v.set(1);
        assert!(!v.take_dirt());
        v.set(2);
        assert!(v.take_dirt());
        *v.get_mut() += 1;
        assert_eq!(*v, 3);
        assert!(v.take_dirt());
    }
}
