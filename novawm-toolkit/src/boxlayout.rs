//! Linear layout of elements, with colored spacers between them.
//!
//! A box holds two sub-containers: one for the laid-out elements and one for
//! the margin rectangles placed in the gaps. Every change to the element list,
//! or to the size or visibility of an element, relayouts the box.

use crate::container::ContainerData;
use crate::element::ElementKind;
use crate::error::ToolkitError;
use crate::scene::{BoxId, ElementId, Scene};
use novawm_core::types::{MarginStyle, Orientation, Point, Size};

pub(crate) struct BoxData {
    pub(crate) container: ContainerData,
    pub(crate) orientation: Orientation,
    pub(crate) margin: MarginStyle,
    pub(crate) element_container: ElementId,
    pub(crate) margin_container: ElementId,
}

impl Scene {
    /// Creates an empty box.
    pub fn create_box(&mut self, orientation: Orientation, margin: &MarginStyle) -> BoxId {
        let element_container = self.create_container();
        let margin_container = self.create_container();
        let id = self.insert(ElementKind::Box(BoxData {
            container: ContainerData {
                children: vec![element_container, margin_container],
                ..ContainerData::default()
            },
            orientation,
            margin: *margin,
            element_container,
            margin_container,
        }));
        for part in [element_container, margin_container] {
            if let Some(node) = self.elements.get_mut(part) {
                node.base.parent = Some(id);
            }
        }
        BoxId(id)
    }

    /// Adds `element` before all other elements of the box.
    pub fn box_add_element_front(&mut self, id: BoxId, element: impl Into<ElementId>) -> Result<(), ToolkitError> {
        let container = self.box_data(id)?.element_container;
        self.container_insert_raw(container, element.into(), true)?;
        self.box_relayout_up(id)
    }

    /// Adds `element` after all other elements of the box.
    pub fn box_add_element_back(&mut self, id: BoxId, element: impl Into<ElementId>) -> Result<(), ToolkitError> {
        let container = self.box_data(id)?.element_container;
        self.container_insert_raw(container, element.into(), false)?;
        self.box_relayout_up(id)
    }

    /// Removes `element` from the box without destroying it.
    pub fn box_remove_element(&mut self, id: BoxId, element: impl Into<ElementId>) -> Result<(), ToolkitError> {
        let container = self.box_data(id)?.element_container;
        self.container_remove_raw(container, element.into())?;
        self.box_relayout_up(id)
    }

    /// Laid-out elements, in layout order.
    pub fn box_elements(&self, id: BoxId) -> Result<&[ElementId], ToolkitError> {
        let container = self.box_data(id)?.element_container;
        self.children(container)
    }

    /// Margin rectangles currently placed between elements.
    pub fn box_margins(&self, id: BoxId) -> Result<&[ElementId], ToolkitError> {
        let container = self.box_data(id)?.margin_container;
        self.children(container)
    }

    pub fn box_orientation(&self, id: BoxId) -> Result<Orientation, ToolkitError> {
        Ok(self.box_data(id)?.orientation)
    }

    pub fn box_set_orientation(&mut self, id: BoxId, orientation: Orientation) -> Result<(), ToolkitError> {
        self.box_data_mut(id)?.orientation = orientation;
        self.box_relayout_up(id)
    }

    fn box_relayout_up(&mut self, id: BoxId) -> Result<(), ToolkitError> {
        self.update_layout(id.0)
    }

    /// Positions the elements and rebuilds the margin rectangles.
    pub(crate) fn box_relayout(&mut self, id: BoxId) -> Result<(), ToolkitError> {
        let (orientation, margin, element_container, margin_container) = {
            let data = self.box_data(id)?;
            (data.orientation, data.margin, data.element_container, data.margin_container)
        };

        let spacers = self.container_data(margin_container)?.children.clone();
        for spacer in spacers {
            self.container_remove_raw(margin_container, spacer)?;
            self.elements.remove(spacer);
        }

        let mut visible = Vec::new();
        let elements = self.container_data(element_container)?.children.clone();
        for element in elements {
            if self.node(element)?.base.visible {
                visible.push((element, self.dimensions(element)?));
            }
        }
        let cross_extent = visible
            .iter()
            .map(|(_, dims)| match orientation {
                Orientation::Horizontal => dims.height(),
                Orientation::Vertical => dims.width(),
            })
            .max()
            .unwrap_or(0);

        let mut offset = 0;
        for (index, (element, dims)) in visible.iter().enumerate() {
            if index > 0 && margin.width > 0 {
                let (position, size) = match orientation {
                    Orientation::Horizontal => (Point::new(offset, 0), Size::new(margin.width, cross_extent)),
                    Orientation::Vertical => (Point::new(0, offset), Size::new(cross_extent, margin.width)),
                };
                let spacer = self.create_rectangle(size, margin.color);
                self.node_mut(spacer)?.base.position = position;
                self.container_insert_raw(margin_container, spacer, false)?;
            }
            if index > 0 {
                offset += margin.width;
            }

            let (position, extent) = match orientation {
                Orientation::Horizontal => (Point::new(offset - dims.left(), -dims.top()), dims.width()),
                Orientation::Vertical => (Point::new(-dims.left(), offset - dims.top()), dims.height()),
            };
            self.node_mut(*element)?.base.position = position;
            offset += extent;
        }
        tracing::trace!("Box {:?} laid out {} elements", id, visible.len());
        Ok(())
    }

    /// Destroys the laid-out elements and the box's internal parts.
    pub(crate) fn box_teardown(&mut self, id: BoxId) -> Result<(), ToolkitError> {
        let (element_container, margin_container) = {
            let data = self.box_data(id)?;
            (data.element_container, data.margin_container)
        };
        let elements = self.container_data(element_container)?.children.clone();
        for element in elements {
            self.destroy(element)?;
        }
        let spacers = self.container_data(margin_container)?.children.clone();
        for spacer in spacers {
            self.container_remove_raw(margin_container, spacer)?;
            self.elements.remove(spacer);
        }
        for part in [element_container, margin_container] {
            self.container_remove_raw(id.0, part)?;
            self.destroy(part)?;
        }
        Ok(())
    }

    pub(crate) fn box_data(&self, id: BoxId) -> Result<&BoxData, ToolkitError> {
        match &self.node(id.0)?.kind {
            ElementKind::Box(data) => Ok(data),
            _ => Err(self.wrong_kind(id.0, "box")),
        }
    }

    fn box_data_mut(&mut self, id: BoxId) -> Result<&mut BoxData, ToolkitError> {
        if !matches!(self.node(id.0)?.kind, ElementKind::Box(_)) {
            return Err(self.wrong_kind(id.0, "box"));
        }
        match &mut self.node_mut(id.0)?.kind {
            ElementKind::Box(data) => Ok(data),
            _ => Err(ToolkitError::StaleElement(id.0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use novawm_core::types::{Color, Rect};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn margin(width: i32) -> MarginStyle {
        MarginStyle {
            width,
            color: Color::BLACK,
        }
    }

    #[rstest]
    #[case(Orientation::Horizontal, [Point::new(0, 0), Point::new(12, 0), Point::new(34, 0)])]
    #[case(Orientation::Vertical, [Point::new(0, 0), Point::new(0, 7), Point::new(0, 16)])]
    fn test_elements_are_placed_with_margins(
        #[case] orientation: Orientation,
        #[case] expected: [Point<i32>; 3],
    ) {
        let mut scene = Scene::default();
        let id = scene.create_box(orientation, &margin(2));
        let a = scene.create_rectangle(Size::new(10, 5), Color::WHITE);
        let b = scene.create_rectangle(Size::new(20, 7), Color::WHITE);
        let c = scene.create_rectangle(Size::new(30, 3), Color::WHITE);
        scene.box_add_element_back(id, b).unwrap();
        scene.box_add_element_back(id, c).unwrap();
        scene.box_add_element_front(id, a).unwrap();

        assert_eq!(scene.box_elements(id).unwrap(), &[a, b, c]);
        let positions: Vec<_> = [a, b, c].iter().map(|e| scene.position(*e).unwrap()).collect();
        assert_eq!(positions, expected.to_vec());
        assert_eq!(scene.box_margins(id).unwrap().len(), 2);
    }

    #[test]
    fn test_margin_spans_cross_extent() {
        let mut scene = Scene::default();
        let id = scene.create_box(Orientation::Horizontal, &margin(3));
        let a = scene.create_rectangle(Size::new(10, 5), Color::WHITE);
        let b = scene.create_rectangle(Size::new(10, 9), Color::WHITE);
        scene.box_add_element_back(id, a).unwrap();
        scene.box_add_element_back(id, b).unwrap();

        let spacer = scene.box_margins(id).unwrap()[0];
        assert_eq!(scene.position(spacer).unwrap(), Point::new(10, 0));
        assert_eq!(scene.rectangle_size(spacer).unwrap(), Size::new(3, 9));
        assert_eq!(scene.dimensions(id).unwrap(), Rect::from_coords(0, 0, 23, 9));
    }

    #[test]
    fn test_hidden_elements_are_skipped() {
        let mut scene = Scene::default();
        let id = scene.create_box(Orientation::Horizontal, &margin(1));
        let a = scene.create_rectangle(Size::new(4, 4), Color::WHITE);
        let b = scene.create_rectangle(Size::new(4, 4), Color::WHITE);
        let c = scene.create_rectangle(Size::new(4, 4), Color::WHITE);
        for e in [a, b, c] {
            scene.box_add_element_back(id, e).unwrap();
        }
        assert_eq!(scene.position(c).unwrap(), Point::new(10, 0));

        scene.set_visible(b, false).unwrap();
        assert_eq!(scene.position(c).unwrap(), Point::new(5, 0));
        assert_eq!(scene.box_margins(id).unwrap().len(), 1);
    }

    #[test]
    fn test_resize_triggers_relayout() {
        let mut scene = Scene::default();
        let id = scene.create_box(Orientation::Vertical, &margin(0));
        let a = scene.create_rectangle(Size::new(4, 4), Color::WHITE);
        let b = scene.create_rectangle(Size::new(4, 4), Color::WHITE);
        scene.box_add_element_back(id, a).unwrap();
        scene.box_add_element_back(id, b).unwrap();
        scene.rectangle_set_size(a, Size::new(4, 10)).unwrap();
        assert_eq!(scene.position(b).unwrap(), Point::new(0, 10));
    }

    #[test]
    fn test_remove_and_destroy() {
        let mut scene = Scene::default();
        let id = scene.create_box(Orientation::Horizontal, &margin(1));
        let kept = scene.create_rectangle(Size::new(4, 4), Color::WHITE);
        let owned = scene.create_rectangle(Size::new(4, 4), Color::WHITE);
        scene.box_add_element_back(id, kept).unwrap();
        scene.box_add_element_back(id, owned).unwrap();

        scene.box_remove_element(id, kept).unwrap();
        assert_eq!(scene.parent(kept).unwrap(), None);
        assert_eq!(scene.position(owned).unwrap(), Point::new(0, 0));
        assert!(scene.box_margins(id).unwrap().is_empty());

        scene.destroy(id).unwrap();
        assert!(!scene.contains(owned));
        assert!(scene.contains(kept));
        assert_eq!(scene.len(), 1);
    }
}
