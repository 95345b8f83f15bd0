//! Elements displaying an externally rendered pixel buffer.

use crate::element::ElementKind;
use crate::error::ToolkitError;
use crate::render::PixelBuffer;
use crate::scene::{ElementId, Scene};
use novawm_core::types::Rect;

#[derive(Debug, Clone, Default)]
pub(crate) struct BufferData {
    pub(crate) buffer: Option<PixelBuffer>,
}

impl BufferData {
    /// An element without a buffer has empty dimensions.
    pub(crate) fn dimensions(&self) -> Rect<i32> {
        match &self.buffer {
            Some(buffer) => Rect::from_coords(0, 0, buffer.width(), buffer.height()),
            None => Rect::default(),
        }
    }
}

impl Scene {
    pub fn create_buffer(&mut self, buffer: Option<PixelBuffer>) -> ElementId {
        self.insert(ElementKind::Buffer(BufferData { buffer }))
    }

    /// The buffer currently displayed, if any.
    pub fn buffer(&self, id: ElementId) -> Result<Option<&PixelBuffer>, ToolkitError> {
        match &self.node(id)?.kind {
            ElementKind::Buffer(data) => Ok(data.buffer.as_ref()),
            _ => Err(self.wrong_kind(id, "buffer")),
        }
    }

    /// Replaces the displayed buffer. Relayouts the ancestors when the size
    /// changes.
    pub fn buffer_set(&mut self, id: ElementId, buffer: Option<PixelBuffer>) -> Result<(), ToolkitError> {
        let node = self.node_mut(id)?;
        let parent = node.base.parent;
        let resized = match &mut node.kind {
            ElementKind::Buffer(data) => {
                let old_size = data.buffer.as_ref().map(PixelBuffer::size);
                let new_size = buffer.as_ref().map(PixelBuffer::size);
                data.buffer = buffer;
                old_size != new_size
            }
            _ => return Err(self.wrong_kind(id, "buffer")),
        };
        if resized {
            if let Some(parent) = parent {
                self.update_layout(parent)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use novawm_core::types::{Color, Point};

    #[test]
    fn test_dimensions_follow_buffer() {
        let mut scene = Scene::default();
        let element = scene.create_buffer(None);
        assert_eq!(scene.dimensions(element).unwrap(), Rect::default());
        assert!(!scene.pointer_motion(element, Point::new(0.0, 0.0), 0).unwrap());

        let pixels = PixelBuffer::filled(8, 4, Color::WHITE).unwrap();
        scene.buffer_set(element, Some(pixels.clone())).unwrap();
        assert_eq!(scene.dimensions(element).unwrap(), Rect::from_coords(0, 0, 8, 4));
        assert!(scene.buffer(element).unwrap().unwrap().same_as(&pixels));
        assert!(scene.pointer_motion(element, Point::new(7.5, 3.5), 1).unwrap());
    }

    #[test]
    fn test_buffer_on_wrong_kind() {
        let mut scene = Scene::default();
        let container = scene.create_container();
        assert!(matches!(
            scene.buffer_set(container, None),
            Err(ToolkitError::WrongKind { expected: "buffer", .. })
        ));
    }
}
