//! Z-ordered fragment collection.
//!
//! Both backends append emitted fragments tagged with an integer z-index
//! and serialize them lowest-first, keeping insertion order within a
//! layer. The fragment type is generic: the SVG backend stores document
//! nodes, the TikZ backend stores statement strings.

/// Fragments grouped by paint-order bucket.
///
/// # Example
///
/// ```
/// use vellum_core::draw::LayerStack;
///
/// let mut stack = LayerStack::new();
/// stack.add(1, "shape");
/// stack.add(0, "edge");
/// stack.add(1, "text");
///
/// let layers = stack.into_layers();
/// assert_eq!(layers, vec![(0, vec!["edge"]), (1, vec!["shape", "text"])]);
/// ```
#[derive(Debug, Clone)]
pub struct LayerStack<T> {
    items: Vec<(i32, T)>,
}

impl<T> LayerStack<T> {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Appends a fragment to the given z-index bucket.
    pub fn add(&mut self, z_index: i32, item: T) {
        self.items.push((z_index, item));
    }

    /// Returns true if no fragment has been added yet.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of fragments across all buckets.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Consumes the stack and returns the layers in ascending z-index
    /// order, fragments within a layer in insertion order.
    pub fn into_layers(mut self) -> Vec<(i32, Vec<T>)> {
        if self.items.is_empty() {
            return Vec::new();
        }

        // Stable sort keeps insertion order within one bucket.
        self.items.sort_by_key(|(z, _)| *z);

        let mut layers: Vec<(i32, Vec<T>)> = Vec::new();
        for (z, item) in self.items {
            match layers.last_mut() {
                Some((current, fragments)) if *current == z => fragments.push(item),
                _ => layers.push((z, vec![item])),
            }
        }
        layers
    }
}

impl<T> Default for LayerStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stack() {
        let stack: LayerStack<&str> = LayerStack::new();
        assert!(stack.is_empty());
        assert_eq!(stack.into_layers(), Vec::new());
    }

    #[test]
    fn test_layers_sorted_ascending() {
        let mut stack = LayerStack::new();
        stack.add(5, "top");
        stack.add(-1, "bottom");
        stack.add(0, "middle");

        let layers = stack.into_layers();
        let order: Vec<i32> = layers.iter().map(|(z, _)| *z).collect();
        assert_eq!(order, vec![-1, 0, 5]);
    }

    #[test]
    fn test_insertion_order_within_layer() {
        let mut stack = LayerStack::new();
        stack.add(0, "first");
        stack.add(1, "interleaved");
        stack.add(0, "second");
        stack.add(0, "third");

        let layers = stack.into_layers();
        assert_eq!(layers[0], (0, vec!["first", "second", "third"]));
        assert_eq!(layers[1], (1, vec!["interleaved"]));
    }

    #[test]
    fn test_len() {
        let mut stack = LayerStack::new();
        assert_eq!(stack.len(), 0);
        stack.add(0, ());
        stack.add(3, ());
        assert_eq!(stack.len(), 2);
    }
}
