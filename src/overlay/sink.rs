/// Commands the overlay issues in response to user gestures.
///
/// The overlay only holds a weak reference to its sink, so implementors use
/// interior mutability.
pub trait CommandSink {
    fn back(&self);
    fn start(&self);
    fn pause(&self);
    fn seek(&self, seconds: i32);
    fn full_screen(&self, full_screen: bool);
    /// Elapsed whole seconds, negative when unknown
    fn get_progress(&self) -> i32;
    /// Whether the underlying session accepts transport commands
    fn video_valid(&self) -> bool;
}
