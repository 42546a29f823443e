use glam::Vec2;

use crate::color::Rgb;

/// Drawing surface the engine renders into once per tick.
///
/// The engine only ever needs two primitives: a translucent full-surface
/// fade (the motion-trail effect) and a filled circle. Keeping the seam this
/// narrow lets the tick run against a plain command recorder, with the GPU
/// presentation living entirely on the host side.
pub trait Surface {
    fn size(&self) -> Vec2;

    /// Composites translucent black over the whole surface, dimming whatever
    /// the previous ticks left behind.
    fn fade(&mut self, alpha: f32);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCmd {
    Fade { alpha: f32 },
    Circle { center: Vec2, radius: f32, color: Rgb },
}

/// The production [`Surface`]: records one tick's draw commands for the
/// renderer to replay, in order, onto the trail texture.
pub struct DrawList {
    size: Vec2,
    commands: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            commands: Vec::new(),
        }
    }

    /// Tracks the viewport across window resizes. Recorded commands keep
    /// their coordinates; out-of-bounds circles are clipped by the renderer.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drops the recorded commands once the renderer has replayed them.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Surface for DrawList {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn fade(&mut self, alpha: f32) {
        self.commands.push(DrawCmd::Fade { alpha });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb) {
        self.commands.push(DrawCmd::Circle {
            center,
            radius,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::GOLD;

    #[test]
    fn records_commands_in_draw_order() {
        let mut list = DrawList::new(800.0, 600.0);
        list.fade(0.15);
        list.fill_circle(Vec2::new(10.0, 20.0), 2.0, GOLD);

        assert_eq!(
            list.commands(),
            &[
                DrawCmd::Fade { alpha: 0.15 },
                DrawCmd::Circle {
                    center: Vec2::new(10.0, 20.0),
                    radius: 2.0,
                    color: GOLD,
                },
            ]
        );

        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn resize_updates_reported_size() {
        let mut list = DrawList::new(800.0, 600.0);
        list.resize(1024.0, 768.0);
        assert_eq!(list.size(), Vec2::new(1024.0, 768.0));
    }
}
