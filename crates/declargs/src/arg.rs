use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;

/// Shared handle to caller-owned scalar storage.
///
/// The parser writes every assigned value through the handle; the caller
/// keeps a clone and reads it after parsing. The last assignment wins.
pub type Binding<T> = Rc<RefCell<T>>;

/// Shared handle to caller-owned sequence storage.
///
/// Every assigned value is appended in assignment order.
pub type SeqBinding<T> = Binding<Vec<T>>;

/// Create an empty binding for [`Arg::store`] or [`Arg::store_all`].
pub fn binding<T: Default>() -> Binding<T> {
    Rc::new(RefCell::new(T::default()))
}

/// One declared command-line argument: its names, multiplicity, positional
/// eligibility and collected values.
///
/// Descriptors are owned by the [`Parser`](crate::Parser) registries.
/// Registration returns `&mut Arg<T>` so configuration calls can be chained;
/// the borrow ends before parsing starts.
#[derive(Debug, Default)]
pub struct Arg<T> {
    short: Option<char>,
    long: String,
    description: String,

    value: T,
    has_value: bool,
    values: Vec<T>,

    min_count: usize,
    positional: bool,
    default_repr: Option<String>,

    store: Option<Binding<T>>,
    store_all: Option<SeqBinding<T>>,
}

impl<T: Clone + Default> Arg<T> {
    pub(crate) fn new(short: Option<char>, long: &str, description: &str) -> Self {
        Arg {
            short,
            long: long.to_string(),
            description: description.to_string(),
            ..Arg::default()
        }
    }

    /// Accept repeated assignment, requiring at least `min` collected values
    /// for validation to pass. A minimum of 0 keeps the plain "assigned at
    /// least once" rule.
    pub fn multi_value(&mut self, min: usize) -> &mut Self {
        self.min_count = min;
        self
    }

    /// Route leftover non-flag tokens into this argument.
    pub fn positional(&mut self) -> &mut Self {
        self.positional = true;
        self
    }

    /// Mirror every assigned value into caller-owned scalar storage.
    pub fn store(&mut self, slot: &Binding<T>) -> &mut Self {
        self.store = Some(Rc::clone(slot));
        self
    }

    /// Append every assigned value to caller-owned sequence storage.
    pub fn store_all(&mut self, slot: &SeqBinding<T>) -> &mut Self {
        self.store_all = Some(Rc::clone(slot));
        self
    }

    /// Assign `value` immediately, exactly as if it came from the command
    /// line. A later real assignment appends on top of it, it does not reset.
    pub fn default_value(&mut self, value: T) -> &mut Self
    where
        T: Display,
    {
        self.default_repr = Some(value.to_string());
        self.assign(value);
        self
    }

    /// Record one value: update the scalar, append to the collection, and
    /// write through both bindings when present.
    pub(crate) fn assign(&mut self, value: T) {
        self.has_value = true;
        self.value = value.clone();
        self.values.push(value.clone());
        if let Some(slot) = &self.store {
            *slot.borrow_mut() = value.clone();
        }
        if let Some(slot) = &self.store_all {
            slot.borrow_mut().push(value);
        }
    }
}

impl<T> Arg<T> {
    /// Last-assigned value; the type's default if never assigned.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// All assigned values, in assignment order.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Whether the argument has been assigned at least once.
    pub fn has_value(&self) -> bool {
        self.has_value
    }

    pub fn short(&self) -> Option<char> {
        self.short
    }

    pub fn long(&self) -> &str {
        &self.long
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_positional(&self) -> bool {
        self.positional
    }

    pub fn min_count(&self) -> usize {
        self.min_count
    }

    pub(crate) fn default_repr(&self) -> Option<&str> {
        self.default_repr.as_deref()
    }
}
