/*!
 * Handle Table
 * Bounded, resizable slot array owned by one process context
 */

use super::descriptor::HostDescriptor;
use crate::core::limits::{MAX_HANDLES, MIN_HANDLES, SENTINEL};
use crate::core::types::Handle;
use crate::error::{ExtendedError, FileError, FileResult};
use tracing::{debug, warn};

/// Clamp a requested slot count into the supported table size
#[inline]
pub fn clamp_count(count: usize) -> usize {
    count.clamp(MIN_HANDLES, MAX_HANDLES)
}

/// Per-process handle table
///
/// Slots are either empty (`None`, the sentinel) or own one host descriptor.
/// A handle is the index of its slot, so valid handles are always below
/// `len()`, which itself stays within `[MIN_HANDLES, MAX_HANDLES]`.
#[derive(Debug)]
pub struct HandleTable<D> {
    slots: Vec<Option<D>>,
}

impl<D: HostDescriptor> HandleTable<D> {
    /// Create a table with the minimum number of slots
    pub fn new() -> Self {
        Self::with_capacity(MIN_HANDLES)
    }

    /// Create a table with `count` slots, clamped into the supported range
    pub fn with_capacity(count: usize) -> Self {
        let mut slots = Vec::with_capacity(clamp_count(count));
        slots.resize_with(clamp_count(count), || None);
        Self { slots }
    }

    /// Current slot count
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false: a table never has fewer than `MIN_HANDLES` slots
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of occupied slots
    pub fn open_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether `handle` currently refers to a descriptor
    #[inline]
    pub fn is_open(&self, handle: Handle) -> bool {
        matches!(self.slots.get(handle as usize), Some(Some(_)))
    }

    /// Occupied handles in ascending order
    pub fn handles(&self) -> impl Iterator<Item = Handle> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(index, _)| index as Handle)
    }

    /// Store `descriptor` in the first empty slot
    ///
    /// On failure the descriptor is dropped, which closes it.
    pub fn allocate(&mut self, descriptor: D) -> FileResult<Handle> {
        let fd = descriptor.host_fd();
        if fd >= SENTINEL {
            warn!(fd, "host descriptor does not fit in a handle slot");
            return Err(ExtendedError::NO_MORE_FILES.into());
        }

        let Some(index) = self.slots.iter().position(Option::is_none) else {
            debug!(slots = self.slots.len(), "handle table exhausted");
            return Err(ExtendedError::NO_MORE_FILES.into());
        };

        self.slots[index] = Some(descriptor);
        Ok(index as Handle)
    }

    /// Empty the slot of `handle` and hand its descriptor back
    ///
    /// Freeing an out-of-range or empty handle is a caller bug.
    pub fn free(&mut self, handle: Handle) -> FileResult<D> {
        let len = self.slots.len();
        self.slots
            .get_mut(handle as usize)
            .and_then(Option::take)
            .ok_or_else(|| {
                FileError::invariant(format!(
                    "freeing handle {handle} which is not open (table has {len} slots)"
                ))
            })
    }

    /// Descriptor behind `handle`
    pub fn lookup(&self, handle: Handle) -> FileResult<&D> {
        self.slots
            .get(handle as usize)
            .and_then(Option::as_ref)
            .ok_or_else(|| ExtendedError::INVALID_HANDLE.into())
    }

    /// Put `descriptor` into the slot of `handle`, returning the previous occupant
    ///
    /// The slot may be empty or occupied but must lie within the table.
    pub fn install(&mut self, handle: Handle, descriptor: D) -> FileResult<Option<D>> {
        let slot = self
            .slots
            .get_mut(handle as usize)
            .ok_or(FileError::Extended(ExtendedError::INVALID_HANDLE))?;
        Ok(slot.replace(descriptor))
    }

    /// Change the slot count, returning the resulting count
    ///
    /// The request is clamped into `[MIN_HANDLES, MAX_HANDLES]`. Growing keeps
    /// every slot in place; the new storage is reserved before anything moves,
    /// so an allocation failure leaves the table as it was. Shrinking over an
    /// open handle is refused without changing the table.
    pub fn resize(&mut self, requested: usize) -> FileResult<usize> {
        let count = clamp_count(requested);
        let current = self.slots.len();

        if count < current {
            if let Some(busy) = self.slots[count..].iter().position(Option::is_some) {
                warn!(
                    requested = count,
                    open_handle = count + busy,
                    "refusing to shrink handle table over an open handle"
                );
                return Err(ExtendedError::TOO_MANY_OPEN_FILES.into());
            }
            self.slots.truncate(count);
            self.slots.shrink_to_fit();
        } else if count > current {
            let mut grown: Vec<Option<D>> = Vec::new();
            grown
                .try_reserve_exact(count)
                .map_err(|_| FileError::Extended(ExtendedError::OUT_OF_MEMORY))?;
            grown.extend(self.slots.drain(..));
            grown.resize_with(count, || None);
            self.slots = grown;
        }

        debug!(from = current, to = count, "handle table resized");
        Ok(self.slots.len())
    }

    /// Close every open descriptor, returning how many were closed
    pub fn close_all(&mut self) -> usize {
        self.slots
            .iter_mut()
            .filter_map(Option::take)
            .map(drop)
            .count()
    }
}

impl<D: HostDescriptor> Default for HandleTable<D> {
    fn default() -> Self {
        Self::new()
    }
}
