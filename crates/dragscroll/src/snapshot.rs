//! Pre-interaction styles of the container and its children
//!
//! Captured once per mount and written back so a drag never leaves a cursor,
//! transform or transition behind.

use tracing::warn;

use crate::host::{ScrollContainer, StyleProperty, StyleTarget};

/// Styles of one child before any interaction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildStyle {
    pub cursor: String,
    pub transform: String,
    pub transition: String,
}

/// Positional snapshot of the container and its children
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSnapshot {
    pub wrapper_cursor: String,
    pub children: Vec<ChildStyle>,
}

/// Computed `none` is stored as empty so restoring clears the inline value
/// instead of pinning a literal `none`
fn normalize(value: String) -> String {
    if value.trim() == "none" {
        String::new()
    } else {
        value
    }
}

impl StyleSnapshot {
    pub fn capture(container: &dyn ScrollContainer) -> Self {
        let children = (0..container.child_count())
            .map(|index| {
                let target = StyleTarget::Child(index);
                ChildStyle {
                    cursor: container.computed_style(target, StyleProperty::Cursor),
                    transform: normalize(
                        container.computed_style(target, StyleProperty::Transform),
                    ),
                    transition: normalize(
                        container.computed_style(target, StyleProperty::Transition),
                    ),
                }
            })
            .collect();

        Self {
            wrapper_cursor: container.computed_style(StyleTarget::Container, StyleProperty::Cursor),
            children,
        }
    }

    pub fn restore_cursors(&self, container: &dyn ScrollContainer) {
        container.set_style(
            StyleTarget::Container,
            StyleProperty::Cursor,
            &self.wrapper_cursor,
        );
        for (index, child) in self.aligned_children(container) {
            container.set_style(StyleTarget::Child(index), StyleProperty::Cursor, &child.cursor);
        }
    }

    pub fn restore_child_transforms(&self, container: &dyn ScrollContainer) {
        for (index, child) in self.aligned_children(container) {
            let target = StyleTarget::Child(index);
            container.set_style(target, StyleProperty::Transform, &child.transform);
            container.set_style(target, StyleProperty::Transition, &child.transition);
        }
    }

    /// Children paired by position; only the common prefix if the list changed
    fn aligned_children<'a>(
        &'a self,
        container: &dyn ScrollContainer,
    ) -> impl Iterator<Item = (usize, &'a ChildStyle)> + 'a {
        let live = container.child_count();
        if live != self.children.len() {
            warn!(
                captured = self.children.len(),
                live,
                "Child list changed since style capture, restoring common prefix"
            );
        }
        self.children.iter().take(live).enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::Extents;
    use crate::virtual_host::VirtualContainer;

    fn container() -> VirtualContainer {
        let container = VirtualContainer::new(
            Extents {
                content_width: 1000.0,
                content_height: 400.0,
                visible_width: 400.0,
                visible_height: 400.0,
            },
            3,
        );
        container.set_style(StyleTarget::Container, StyleProperty::Cursor, "grab");
        container.set_style(StyleTarget::Child(1), StyleProperty::Transform, "rotate(3deg)");
        container
    }

    #[test]
    fn test_capture_normalizes_none() {
        let container = container();
        let snapshot = StyleSnapshot::capture(&container);
        assert_eq!(snapshot.wrapper_cursor, "grab");
        assert_eq!(snapshot.children.len(), 3);
        assert_eq!(snapshot.children[0].transform, "");
        assert_eq!(snapshot.children[0].transition, "");
        assert_eq!(snapshot.children[1].transform, "rotate(3deg)");
    }

    #[test]
    fn test_restore_round_trip() {
        let container = container();
        let snapshot = StyleSnapshot::capture(&container);
        let before = container.style_dump();

        for index in 0..3 {
            let target = StyleTarget::Child(index);
            container.set_style(target, StyleProperty::Cursor, "grabbing");
            container.set_style(target, StyleProperty::Transform, "translate3d(4px, 0px, 0px)");
            container.set_style(target, StyleProperty::Transition, "transform 0s");
        }
        container.set_style(StyleTarget::Container, StyleProperty::Cursor, "grabbing");

        snapshot.restore_cursors(&container);
        snapshot.restore_child_transforms(&container);
        assert_eq!(container.style_dump(), before);
    }

    #[test]
    fn test_restore_with_fewer_children_does_not_panic() {
        let container = container();
        let snapshot = StyleSnapshot::capture(&container);
        container.set_child_count(1);
        snapshot.restore_cursors(&container);
        snapshot.restore_child_transforms(&container);
        assert_eq!(
            container.computed_style(StyleTarget::Child(0), StyleProperty::Transform),
            "none"
        );
    }
}
