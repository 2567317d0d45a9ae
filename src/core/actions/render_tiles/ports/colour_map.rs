pub trait ColourMap: Send + Sync {
    /// The palette as CSS colour strings. Every call returns a fresh copy.
    fn spectrum(&self) -> Vec<String>;
}
