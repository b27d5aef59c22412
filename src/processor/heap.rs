use std::convert::TryFrom;
use std::num::Wrapping;

use crate::error::Error;
use crate::Word;

/// Integer-addressed heap, distinct from the evaluation stack.
///
/// Backed by a dense, auto-extending `Vec` rather than a `HashMap` — the
/// spec explicitly allows this ("The implementation may use a dense growable
/// array that auto-extends on store") — with a written/unwritten flag per
/// cell so a read of an address that was never stored to is a real
/// `UnassignedHeap` error rather than silently defaulting to zero.
#[derive(Default, Debug)]
pub struct Heap {
    cells: Vec<Option<Wrapping<Word>>>,
}

impl Heap {
    pub fn new() -> Heap {
        Heap { cells: Vec::new() }
    }

    pub fn store(&mut self, address: i64, value: Wrapping<Word>) -> Result<(), Error> {
        let index = to_index(address)?;
        if index >= self.cells.len() {
            self.cells.resize(index + 1, None);
        }
        self.cells[index] = Some(value);
        Ok(())
    }

    pub fn load(&self, address: i64) -> Result<Wrapping<Word>, Error> {
        let index = to_index(address)?;
        self.cells
            .get(index)
            .copied()
            .flatten()
            .ok_or(Error::UnassignedHeap { address })
    }
}

fn to_index(address: i64) -> Result<usize, Error> {
    usize::try_from(address).map_err(|_| Error::UnassignedHeap { address })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trip() {
        let mut heap = Heap::new();
        heap.store(0, Wrapping(7)).unwrap();
        assert_eq!(heap.load(0).unwrap(), Wrapping(7));
    }

    #[test]
    fn unwritten_address_is_fatal() {
        let heap = Heap::new();
        assert_eq!(
            heap.load(3).unwrap_err(),
            Error::UnassignedHeap { address: 3 }
        );
    }

    #[test]
    fn store_auto_extends() {
        let mut heap = Heap::new();
        heap.store(10, Wrapping(5)).unwrap();
        assert_eq!(heap.load(10).unwrap(), Wrapping(5));
        assert!(heap.load(0).is_err());
    }

    #[test]
    fn negative_address_is_rejected() {
        let heap = Heap::new();
        assert!(heap.load(-1).is_err());
    }
}
