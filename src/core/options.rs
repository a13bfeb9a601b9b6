//=========================================================================
// Options
//=========================================================================
//
// Process-wide keyed configuration store.
//
// Each entry carries its own ownership policy:
//
//   set()               → options owns the value, dropped on clear
//   set_with_destroy()  → options owns the value, destroy closure runs
//                         exactly once on overwrite/clear/drop
//   set_no_copy()       → value is shared with the caller (Arc); clearing
//                         only releases the store's handle
//
// The store also owns the single `Bindings` table for its lifetime.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use log::debug;

//=== Internal Dependencies ===============================================

use super::input::Bindings;

//=== OptionName ==========================================================

/// Key of an option entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionName {
    /// Window size as a [`WindowSize`].
    WindowSize,

    /// Game-defined option.
    Custom(u32),
}

/// Value stored under [`OptionName::WindowSize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

//=== Entry ===============================================================

type Destructor = Box<dyn FnOnce(Box<dyn Any + Send>) + Send>;

enum Entry {
    Owned {
        value: Option<Box<dyn Any + Send>>,
        destroy: Option<Destructor>,
    },
    Shared(Arc<dyn Any + Send + Sync>),
}

impl Entry {
    fn value(&self) -> &dyn Any {
        match self {
            Entry::Owned { value: Some(value), .. } => &**value,
            Entry::Owned { value: None, .. } => &(),
            Entry::Shared(value) => &**value,
        }
    }
}

impl Drop for Entry {
    fn drop(&mut self) {
        if let Entry::Owned { value, destroy } = self {
            if let (Some(value), Some(destroy)) = (value.take(), destroy.take()) {
                destroy(value);
            }
        }
    }
}

//=== Options =============================================================

/// Keyed, type-erased option store plus the input bindings table.
///
/// # Examples
///
/// ```
/// use arcade_engine::prelude::*;
///
/// let mut options = Options::new();
/// options.set(OptionName::WindowSize, WindowSize { width: 640, height: 480 });
///
/// let size = options.get::<WindowSize>(OptionName::WindowSize);
/// assert_eq!(size, Some(&WindowSize { width: 640, height: 480 }));
/// ```
#[derive(Default)]
pub struct Options {
    entries: HashMap<OptionName, Entry>,
    bindings: Bindings,
}

impl Options {
    /// Creates an empty store with empty bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with the given bindings.
    pub fn with_bindings(bindings: Bindings) -> Self {
        Self {
            entries: HashMap::new(),
            bindings,
        }
    }

    //--- Bindings ---------------------------------------------------------

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut Bindings {
        &mut self.bindings
    }

    //--- Insertion --------------------------------------------------------

    /// Stores `value`, owned by the store. Replaces any previous entry.
    pub fn set<T: Any + Send>(&mut self, name: OptionName, value: T) {
        self.insert(
            name,
            Entry::Owned {
                value: Some(Box::new(value)),
                destroy: None,
            },
        );
    }

    /// Stores `value` and registers `destroy`, which receives the value
    /// exactly once when the entry is overwritten, cleared, or the store
    /// is dropped.
    pub fn set_with_destroy<T, F>(&mut self, name: OptionName, value: T, destroy: F)
    where
        T: Any + Send,
        F: FnOnce(T) + Send + 'static,
    {
        let destroy: Destructor = Box::new(move |value: Box<dyn Any + Send>| {
            if let Ok(value) = value.downcast::<T>() {
                destroy(*value);
            }
        });

        self.insert(
            name,
            Entry::Owned {
                value: Some(Box::new(value)),
                destroy: Some(destroy),
            },
        );
    }

    /// Stores a handle to a caller-owned value.
    ///
    /// `get` returns a reference to the very value behind `value`; clearing
    /// the entry never drops the caller's value.
    pub fn set_no_copy<T: Any + Send + Sync>(&mut self, name: OptionName, value: Arc<T>) {
        self.insert(name, Entry::Shared(value));
    }

    fn insert(&mut self, name: OptionName, entry: Entry) {
        if self.entries.insert(name, entry).is_some() {
            debug!("Option {:?} overwritten", name);
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has(&self, name: OptionName) -> bool {
        self.entries.contains_key(&name)
    }

    /// Returns the value stored under `name` if it is a `T`.
    pub fn get<T: Any>(&self, name: OptionName) -> Option<&T> {
        self.entries.get(&name)?.value().downcast_ref::<T>()
    }

    /// Returns a mutable reference to an owned value.
    ///
    /// Shared (`set_no_copy`) entries are read-only and return `None`.
    pub fn get_mut<T: Any>(&mut self, name: OptionName) -> Option<&mut T> {
        match self.entries.get_mut(&name)? {
            Entry::Owned { value: Some(value), .. } => (**value).downcast_mut::<T>(),
            _ => None,
        }
    }

    //--- Removal ----------------------------------------------------------

    /// Removes the entry, applying its destroy policy.
    pub fn clear(&mut self, name: OptionName) {
        self.entries.remove(&name);
    }

    /// Removes every entry. Bindings are kept.
    pub fn clear_all(&mut self) {
        self.entries.clear();
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("entries", &self.entries.keys().collect::<Vec<_>>())
            .field("bindings", &self.bindings)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
