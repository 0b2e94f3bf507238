/// Rendering capabilities the embedding environment provides.
///
/// The search bar never touches a concrete UI toolkit. It asks the host to
/// draw the two controls once at mount time, then drives the expanded
/// state and the input contents in response to `HostEvent`s.
pub trait Host: Send {
    // Icon that expands/collapses the bar; commits in click mode.
    fn render_toggle_control(&mut self);

    // Text input plus its clear button.
    fn render_input(&mut self);

    fn toggle_expanded(&mut self);

    fn input_value(&self) -> String;

    fn clear_input(&mut self);
}
