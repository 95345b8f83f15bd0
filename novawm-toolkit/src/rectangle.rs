//! Solid color rectangles: box spacers, menu borders and the lock curtain.

use crate::element::ElementKind;
use crate::error::ToolkitError;
use crate::scene::{ElementId, Scene};
use novawm_core::types::{Color, Size};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RectangleData {
    pub(crate) size: Size<i32>,
    pub(crate) color: Color,
}

impl Scene {
    pub fn create_rectangle(&mut self, size: Size<i32>, color: Color) -> ElementId {
        self.insert(ElementKind::Rectangle(RectangleData { size, color }))
    }

    pub fn rectangle_size(&self, id: ElementId) -> Result<Size<i32>, ToolkitError> {
        Ok(self.rectangle_data(id)?.size)
    }

    pub fn rectangle_color(&self, id: ElementId) -> Result<Color, ToolkitError> {
        Ok(self.rectangle_data(id)?.color)
    }

    pub fn rectangle_set_size(&mut self, id: ElementId, size: Size<i32>) -> Result<(), ToolkitError> {
        if self.rectangle_set_size_raw(id, size)? {
            let parent = self.node(id)?.base.parent;
            if let Some(parent) = parent {
                self.update_layout(parent)?;
            }
        }
        Ok(())
    }

    pub fn rectangle_set_color(&mut self, id: ElementId, color: Color) -> Result<(), ToolkitError> {
        self.rectangle_data_mut(id)?.color = color;
        Ok(())
    }

    /// Resizes without relayout; returns whether the size changed.
    pub(crate) fn rectangle_set_size_raw(&mut self, id: ElementId, size: Size<i32>) -> Result<bool, ToolkitError> {
        let data = self.rectangle_data_mut(id)?;
        if data.size == size {
            return Ok(false);
        }
        data.size = size;
        Ok(true)
    }

    fn rectangle_data(&self, id: ElementId) -> Result<&RectangleData, ToolkitError> {
        match &self.node(id)?.kind {
            ElementKind::Rectangle(data) => Ok(data),
            _ => Err(self.wrong_kind(id, "rectangle")),
        }
    }

    fn rectangle_data_mut(&mut self, id: ElementId) -> Result<&mut RectangleData, ToolkitError> {
        if !matches!(self.node(id)?.kind, ElementKind::Rectangle(_)) {
            return Err(self.wrong_kind(id, "rectangle"));
        }
        match &mut self.node_mut(id)?.kind {
            ElementKind::Rectangle(data) => Ok(data),
            _ => Err(ToolkitError::StaleElement(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use novawm_core::types::{Point, Rect};

    #[test]
    fn test_resize_updates_parent_dimensions() {
        let mut scene = Scene::default();
        let container = scene.create_container();
        let rect = scene.create_rectangle(Size::new(2, 2), Color::BLACK);
        scene.add_element(container, rect).unwrap();
        scene.set_position(rect, Point::new(3, 4)).unwrap();

        scene.rectangle_set_size(rect, Size::new(10, 6)).unwrap();
        assert_eq!(scene.rectangle_size(rect).unwrap(), Size::new(10, 6));
        assert_eq!(scene.dimensions(container).unwrap(), Rect::from_coords(3, 4, 10, 6));
    }

    #[test]
    fn test_color_setter() {
        let mut scene = Scene::default();
        let rect = scene.create_rectangle(Size::new(1, 1), Color::BLACK);
        scene.rectangle_set_color(rect, Color::WHITE).unwrap();
        assert_eq!(scene.rectangle_color(rect).unwrap(), Color::WHITE);
    }
}
