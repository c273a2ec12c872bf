use crate::ecs::{Value, component::Id, empty_record};

/// A specification for attaching one component to an entity.
///
/// A bare spec attaches the component with an empty record as its initial state. A spec carrying
/// state attaches the component with that value.
#[derive(Debug, Clone, PartialEq)]
pub enum Spec {
    /// Attach the component with an empty initial state.
    Bare(Id),
    /// Attach the component with the given initial state.
    WithState(Id, Value),
}

impl Spec {
    /// Construct a spec with an explicit initial state.
    #[inline]
    pub fn with_state(id: impl Into<Id>, state: Value) -> Self {
        Self::WithState(id.into(), state)
    }

    /// Get the component id this spec attaches.
    #[inline]
    pub fn id(&self) -> &Id {
        match self {
            Self::Bare(id) | Self::WithState(id, _) => id,
        }
    }

    /// Split the spec into the component id and the initial state to write.
    #[inline]
    pub fn into_parts(self) -> (Id, Value) {
        match self {
            Self::Bare(id) => (id, empty_record()),
            Self::WithState(id, state) => (id, state),
        }
    }
}

impl From<Id> for Spec {
    fn from(id: Id) -> Self {
        Self::Bare(id)
    }
}

impl From<&str> for Spec {
    fn from(id: &str) -> Self {
        Self::Bare(id.into())
    }
}

impl<I: Into<Id>> From<(I, Value)> for Spec {
    fn from((id, state): (I, Value)) -> Self {
        Self::WithState(id.into(), state)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn bare_spec_defaults_to_empty_record() {
        // Given
        let spec = Spec::from("moveable");

        // When
        let (id, state) = spec.into_parts();

        // Then
        assert_eq!(id, Id::from("moveable"));
        assert_eq!(state, json!({}));
    }

    #[test]
    fn spec_with_state_keeps_value() {
        // Given
        let spec = Spec::from(("moveable", json!({ "pos_x": 3 })));

        // Then
        assert_eq!(spec.id(), &Id::from("moveable"));
        assert_eq!(spec.into_parts().1, json!({ "pos_x": 3 }));
    }
}
