//! Gesture API
//!
//! Every gesture is a fixed chain of primitive appends. Pointer and key
//! targets, keys and coordinates are resolved before the first append, so a
//! rejected gesture leaves all timelines as they were.

use action_primitives::{Action, IntoKey, MouseButton, Origin};
use wd_core_types::ElementRef;

use crate::builder::ActionSequenceBuilder;
use crate::errors::FlowResult;
use crate::types::DEFAULT_MOVE_DURATION_MS;

impl ActionSequenceBuilder {
    /// Move the pointer onto `element`.
    ///
    /// Without offsets the pointer lands on the element's center. With both
    /// offsets it lands that far from the element's top-left corner; a
    /// single offset is ignored.
    pub fn move_to(
        &mut self,
        element: &ElementRef,
        offset_x: Option<i64>,
        offset_y: Option<i64>,
        pointer: Option<&str>,
    ) -> FlowResult<&mut Self> {
        let idx = self.resolve_pointer(pointer)?;
        self.move_to_element(idx, element, offset_x.zip(offset_y))?;
        Ok(self)
    }

    /// Move the pointer relative to where it currently is.
    pub fn move_by(&mut self, dx: i64, dy: i64, pointer: Option<&str>) -> FlowResult<&mut Self> {
        let idx = self.resolve_pointer(pointer)?;
        let action = Action::pointer_move(DEFAULT_MOVE_DURATION_MS, dx, dy, Origin::Pointer)?;
        self.append(idx, action)?;
        Ok(self)
    }

    /// Move the pointer to absolute viewport coordinates.
    pub fn move_to_location(
        &mut self,
        x: i64,
        y: i64,
        pointer: Option<&str>,
    ) -> FlowResult<&mut Self> {
        let idx = self.resolve_pointer(pointer)?;
        let action = Action::pointer_move(DEFAULT_MOVE_DURATION_MS, x, y, Origin::Viewport)?;
        self.append(idx, action)?;
        Ok(self)
    }

    pub fn pointer_down(
        &mut self,
        button: impl Into<i64>,
        pointer: Option<&str>,
    ) -> FlowResult<&mut Self> {
        let idx = self.resolve_pointer(pointer)?;
        let action = Action::pointer_down(button.into())?;
        self.append(idx, action)?;
        Ok(self)
    }

    pub fn pointer_up(
        &mut self,
        button: impl Into<i64>,
        pointer: Option<&str>,
    ) -> FlowResult<&mut Self> {
        let idx = self.resolve_pointer(pointer)?;
        let action = Action::pointer_up(button.into())?;
        self.append(idx, action)?;
        Ok(self)
    }

    pub fn pointer_cancel(&mut self, pointer: Option<&str>) -> FlowResult<&mut Self> {
        let idx = self.resolve_pointer(pointer)?;
        self.append(idx, Action::pointer_cancel())?;
        Ok(self)
    }

    /// Press the left button, after moving onto `element` when given.
    pub fn click_and_hold(
        &mut self,
        element: Option<&ElementRef>,
        pointer: Option<&str>,
    ) -> FlowResult<&mut Self> {
        let idx = self.resolve_pointer(pointer)?;
        self.press_at(idx, element, MouseButton::Left)?;
        Ok(self)
    }

    /// Release the left button.
    pub fn release(&mut self, pointer: Option<&str>) -> FlowResult<&mut Self> {
        let idx = self.resolve_pointer(pointer)?;
        self.append(idx, Action::pointer_up(MouseButton::Left.code())?)?;
        Ok(self)
    }

    pub fn click(
        &mut self,
        element: Option<&ElementRef>,
        pointer: Option<&str>,
    ) -> FlowResult<&mut Self> {
        let idx = self.resolve_pointer(pointer)?;
        self.click_at(idx, element, MouseButton::Left)?;
        Ok(self)
    }

    pub fn double_click(
        &mut self,
        element: Option<&ElementRef>,
        pointer: Option<&str>,
    ) -> FlowResult<&mut Self> {
        let idx = self.resolve_pointer(pointer)?;
        self.click_at(idx, element, MouseButton::Left)?;
        self.click_at(idx, None, MouseButton::Left)?;
        Ok(self)
    }

    /// Right click, after moving onto `element` when given.
    pub fn context_click(
        &mut self,
        element: Option<&ElementRef>,
        pointer: Option<&str>,
    ) -> FlowResult<&mut Self> {
        let idx = self.resolve_pointer(pointer)?;
        self.click_at(idx, element, MouseButton::Right)?;
        Ok(self)
    }

    pub fn drag_and_drop(
        &mut self,
        source: &ElementRef,
        target: &ElementRef,
        pointer: Option<&str>,
    ) -> FlowResult<&mut Self> {
        let idx = self.resolve_pointer(pointer)?;
        self.press_at(idx, Some(source), MouseButton::Left)?;
        self.move_to_element(idx, target, None)?;
        self.append(idx, Action::pointer_up(MouseButton::Left.code())?)?;
        Ok(self)
    }

    /// Press a key on the keyboard. The key stays down until released.
    pub fn key_down(&mut self, key: impl IntoKey) -> FlowResult<&mut Self> {
        let idx = self.resolve_keyboard()?;
        let key = key.into_key()?;
        self.append(idx, Action::key_down(key))?;
        Ok(self)
    }

    pub fn key_up(&mut self, key: impl IntoKey) -> FlowResult<&mut Self> {
        let idx = self.resolve_keyboard()?;
        let key = key.into_key()?;
        self.append(idx, Action::key_up(key))?;
        Ok(self)
    }

    /// Press and release every character of `text` in order. Keys held
    /// before the call stay held.
    pub fn send_keys(&mut self, text: &str) -> FlowResult<&mut Self> {
        let idx = self.resolve_keyboard()?;
        for c in text.chars() {
            let key = c.into_key()?;
            self.append(idx, Action::key_down(key))?;
            self.append(idx, Action::key_up(key))?;
        }
        Ok(self)
    }

    /// Click `element` with the primary pointer, then press `key`.
    pub fn key_down_on(&mut self, element: &ElementRef, key: impl IntoKey) -> FlowResult<&mut Self> {
        let keyboard = self.resolve_keyboard()?;
        let pointer = self.resolve_pointer(None)?;
        let key = key.into_key()?;
        self.click_at(pointer, Some(element), MouseButton::Left)?;
        self.append(keyboard, Action::key_down(key))?;
        Ok(self)
    }

    /// Click `element` with the primary pointer, then release `key`.
    pub fn key_up_on(&mut self, element: &ElementRef, key: impl IntoKey) -> FlowResult<&mut Self> {
        let keyboard = self.resolve_keyboard()?;
        let pointer = self.resolve_pointer(None)?;
        let key = key.into_key()?;
        self.click_at(pointer, Some(element), MouseButton::Left)?;
        self.append(keyboard, Action::key_up(key))?;
        Ok(self)
    }

    /// Click `element` with the primary pointer, then type `text`.
    pub fn send_keys_to(&mut self, element: &ElementRef, text: &str) -> FlowResult<&mut Self> {
        self.resolve_keyboard()?;
        let pointer = self.resolve_pointer(None)?;
        self.click_at(pointer, Some(element), MouseButton::Left)?;
        self.send_keys(text)
    }

    fn move_to_element(
        &mut self,
        idx: usize,
        element: &ElementRef,
        offset: Option<(i64, i64)>,
    ) -> FlowResult<()> {
        let (x, y) = match offset {
            Some((dx, dy)) => (
                dx - element.size.half_width(),
                dy - element.size.half_height(),
            ),
            None => (0, 0),
        };
        let action = Action::pointer_move(
            DEFAULT_MOVE_DURATION_MS,
            x,
            y,
            Origin::Element(element.clone()),
        )?;
        self.append(idx, action)
    }

    fn press_at(
        &mut self,
        idx: usize,
        element: Option<&ElementRef>,
        button: MouseButton,
    ) -> FlowResult<()> {
        if let Some(element) = element {
            self.move_to_element(idx, element, None)?;
        }
        self.append(idx, Action::pointer_down(button.code())?)
    }

    fn click_at(
        &mut self,
        idx: usize,
        element: Option<&ElementRef>,
        button: MouseButton,
    ) -> FlowResult<()> {
        self.press_at(idx, element, button)?;
        self.append(idx, Action::pointer_up(button.code())?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use action_primitives::{InputDevice, Key, NamedKey, PointerKind};
    use wd_bridge::NoopTransport;
    use wd_core_types::ElementSize;

    use super::*;

    fn builder() -> ActionSequenceBuilder {
        ActionSequenceBuilder::new(Arc::new(NoopTransport))
    }

    fn element(id: &str, width: i64, height: i64) -> ElementRef {
        ElementRef::new(id, ElementSize::new(width, height).unwrap()).unwrap()
    }

    fn mouse_actions(builder: &ActionSequenceBuilder) -> Vec<Action> {
        builder.device("mouse").unwrap().timeline().to_vec()
    }

    fn keyboard_actions(builder: &ActionSequenceBuilder) -> Vec<Action> {
        builder.device("keyboard").unwrap().timeline().to_vec()
    }

    fn center_move(el: &ElementRef) -> Action {
        Action::pointer_move(0, 0, 0, Origin::Element(el.clone())).unwrap()
    }

    #[test]
    fn click_moves_presses_and_releases() {
        let el = element("button", 80, 20);
        let mut b = builder();
        b.click(Some(&el), None).unwrap();

        assert_eq!(
            mouse_actions(&b),
            vec![
                center_move(&el),
                Action::pointer_down(0).unwrap(),
                Action::pointer_up(0).unwrap(),
            ]
        );
        assert_eq!(keyboard_actions(&b), vec![Action::pause(0); 3]);
    }

    #[test]
    fn click_without_element_skips_the_move() {
        let mut b = builder();
        b.click(None, None).unwrap();
        assert_eq!(mouse_actions(&b).len(), 2);
    }

    #[test]
    fn move_to_with_offsets_is_relative_to_top_left() {
        let el = element("canvas", 100, 50);
        let mut b = builder();
        b.move_to(&el, Some(10), Some(5), None).unwrap();
        assert_eq!(
            mouse_actions(&b),
            vec![Action::pointer_move(0, -40, -20, Origin::Element(el.clone())).unwrap()]
        );
    }

    #[test]
    fn move_to_with_one_offset_targets_center() {
        let el = element("canvas", 100, 50);
        let mut b = builder();
        b.move_to(&el, Some(10), None, None).unwrap();
        assert_eq!(mouse_actions(&b), vec![center_move(&el)]);
    }

    #[test]
    fn move_by_and_move_to_location_use_their_origins() {
        let mut b = builder();
        b.move_by(-5, 7, None).unwrap().move_to_location(30, 40, None).unwrap();
        assert_eq!(
            mouse_actions(&b),
            vec![
                Action::pointer_move(0, -5, 7, Origin::Pointer).unwrap(),
                Action::pointer_move(0, 30, 40, Origin::Viewport).unwrap(),
            ]
        );
    }

    #[test]
    fn double_click_is_two_clicks_after_one_move() {
        let el = element("row", 10, 10);
        let mut b = builder();
        b.double_click(Some(&el), None).unwrap();
        let down = Action::pointer_down(0).unwrap();
        let up = Action::pointer_up(0).unwrap();
        assert_eq!(
            mouse_actions(&b),
            vec![center_move(&el), down.clone(), up.clone(), down, up]
        );
    }

    #[test]
    fn context_click_uses_the_right_button() {
        let mut b = builder();
        b.context_click(None, None).unwrap();
        assert_eq!(
            mouse_actions(&b),
            vec![
                Action::pointer_down(2).unwrap(),
                Action::pointer_up(2).unwrap()
            ]
        );
    }

    #[test]
    fn drag_and_drop_is_hold_move_release() {
        let src = element("src", 20, 20);
        let dst = element("dst", 40, 40);
        let mut b = builder();
        b.drag_and_drop(&src, &dst, None).unwrap();
        assert_eq!(
            mouse_actions(&b),
            vec![
                center_move(&src),
                Action::pointer_down(0).unwrap(),
                center_move(&dst),
                Action::pointer_up(0).unwrap(),
            ]
        );
    }

    #[test]
    fn send_keys_presses_and_releases_each_char() {
        let mut b = builder();
        b.send_keys("ab").unwrap();
        assert_eq!(
            keyboard_actions(&b),
            vec![
                Action::key_down(Key::Char('a')),
                Action::key_up(Key::Char('a')),
                Action::key_down(Key::Char('b')),
                Action::key_up(Key::Char('b')),
            ]
        );
        assert_eq!(mouse_actions(&b), vec![Action::pause(0); 4]);
    }

    #[test]
    fn held_modifier_is_not_released_by_send_keys() {
        let mut b = builder();
        b.key_down("shift").unwrap().send_keys("x").unwrap();
        let actions = keyboard_actions(&b);
        assert_eq!(actions[0], Action::key_down(Key::Named(NamedKey::Shift)));
        assert!(!actions.contains(&Action::key_up(Key::Named(NamedKey::Shift))));
    }

    #[test]
    fn invalid_key_is_rejected_before_any_append() {
        let el = element("input", 10, 10);
        let mut b = builder();
        let err = b.key_down_on(&el, "not-a-key").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(b.tick_count(), 0);
    }

    #[test]
    fn negative_primitive_values_leave_timelines_unchanged() {
        let mut b = builder();
        b.click(None, None).unwrap();
        let before: Vec<usize> = b.devices().map(InputDevice::len).collect();

        assert!(b.pointer_down(-1, None).unwrap_err().is_validation());
        assert!(b.pointer_up(-2, None).unwrap_err().is_validation());
        assert!(b.move_to_location(-1, 0, None).unwrap_err().is_validation());
        assert!(b.move_to_location(0, -1, None).unwrap_err().is_validation());

        let after: Vec<usize> = b.devices().map(InputDevice::len).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn send_keys_to_clicks_before_typing() {
        let el = element("field", 10, 10);
        let mut b = builder();
        b.send_keys_to(&el, "k").unwrap();
        assert_eq!(b.tick_count(), 5);
        assert_eq!(
            &keyboard_actions(&b)[3..],
            &[Action::key_down(Key::Char('k')), Action::key_up(Key::Char('k'))]
        );
    }

    #[test]
    fn explicit_pointer_targets_that_device_only() {
        let mut b = builder();
        b.add_pointer_input(PointerKind::Touch, "finger", false)
            .unwrap()
            .click(None, Some("finger"))
            .unwrap();
        let finger = b.device("finger").unwrap().timeline().to_vec();
        assert_eq!(
            finger,
            vec![Action::pointer_down(0).unwrap(), Action::pointer_up(0).unwrap()]
        );
        assert_eq!(mouse_actions(&b), vec![Action::pause(0); 2]);
    }

    #[test]
    fn gestures_fail_without_primary_pointer() {
        let mut b = ActionSequenceBuilder::with_devices(
            Arc::new(NoopTransport),
            false,
            vec![InputDevice::key("keyboard")],
        )
        .unwrap();
        assert!(b.click(None, None).unwrap_err().is_configuration());
        assert!(b.release(None).unwrap_err().is_configuration());
        assert_eq!(b.tick_count(), 0);
    }

    #[test]
    fn pointer_cancel_targets_a_pointer() {
        let mut b = builder();
        b.pointer_cancel(None).unwrap();
        assert_eq!(mouse_actions(&b), vec![Action::pointer_cancel()]);
        assert!(b.pointer_cancel(Some("keyboard")).is_err());
    }
}
