use iced::mouse::{self, Cursor};
use iced::widget::canvas::{self, Program};
use iced::{Color, Point, Rectangle, Renderer, Size, Theme};

use crate::app::{Message, PointerEvent, PointerKind};
use crate::error::DrawError;
use crate::state::viewer::Viewer;
use crate::state::viewport::{self, DrawCommand, DrawTarget, Viewport};

/// Canvas program drawing the filmstrip and turning mouse input into pan messages
pub struct Filmstrip<'a> {
    pub viewer: &'a Viewer,
}

/// Draws decoded images into a canvas frame
struct FrameTarget<'a, 'f> {
    viewer: &'a Viewer,
    frame: &'f mut canvas::Frame,
}

impl DrawTarget for FrameTarget<'_, '_> {
    fn draw(&mut self, command: &DrawCommand) -> Result<(), DrawError> {
        let image = self.viewer.image(&command.identifier)?;

        let bounds = Rectangle::new(
            Point::new(command.x as f32, 0.0),
            Size::new(command.width as f32, command.height as f32),
        );
        self.frame.draw_image(bounds, &image.handle);
        Ok(())
    }
}

impl Program<Message> for Filmstrip<'_> {
    type State = DragState;

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), Color::from_rgb(0.08, 0.08, 0.08));

        let viewport = Viewport::new(self.viewer.viewport_width(), bounds.height.round() as i32);
        let viewer = self.viewer;

        frame.with_clip(Rectangle::with_size(bounds.size()), |frame| {
            let mut target = FrameTarget { viewer, frame };
            viewport::render(viewer.offset(), viewport, viewer.sequence(), &mut target);
        });

        vec![frame.into_geometry()]
    }

    fn update(
        &self,
        state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        let width = bounds.width.round() as i32;
        let relative_x = |point: Point| (point.x - bounds.x).round() as i32;

        match event {
            // Mouse button press - start dragging
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if let Some(pos) = cursor.position_in(bounds) {
                    let x = pos.x.round() as i32;
                    state.is_dragging = true;
                    state.last_x = Some(x);
                    return (
                        canvas::event::Status::Captured,
                        Some(Message::Pointer(PointerEvent {
                            kind: PointerKind::Pressed,
                            x,
                            width,
                        })),
                    );
                }
            }

            // Mouse move - pan if dragging
            canvas::Event::Mouse(mouse::Event::CursorMoved { position }) => {
                if state.is_dragging {
                    let x = relative_x(position);
                    if state.last_x != Some(x) {
                        state.last_x = Some(x);
                        return (
                            canvas::event::Status::Captured,
                            Some(Message::Pointer(PointerEvent {
                                kind: PointerKind::Dragged,
                                x,
                                width,
                            })),
                        );
                    }
                    return (canvas::event::Status::Captured, None);
                }
            }

            // Mouse button release - snap
            canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                if state.is_dragging {
                    let x = cursor
                        .position()
                        .map(relative_x)
                        .or(state.last_x)
                        .unwrap_or_default();
                    *state = DragState::default();
                    return (
                        canvas::event::Status::Captured,
                        Some(Message::Pointer(PointerEvent {
                            kind: PointerKind::Released,
                            x,
                            width,
                        })),
                    );
                }
            }

            _ => {}
        }

        (canvas::event::Status::Ignored, None)
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> mouse::Interaction {
        if state.is_dragging {
            mouse::Interaction::Grabbing
        } else if cursor.is_over(bounds) {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::default()
        }
    }
}

/// State for drag interactions
#[derive(Debug, Clone, Default)]
pub struct DragState {
    pub is_dragging: bool,
    /// Last pointer x relative to the canvas
    pub last_x: Option<i32>,
}
