use crate::core::RelationshipKind;

/// Decorator conventions of one framework: how entities are marked and which
/// decorators describe relationships.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoratorProfile {
    pub name: &'static str,
    /// Text whose presence anywhere in a file makes its classes entities
    pub entity_marker: &'static str,
    pub relations: &'static [(&'static str, RelationshipKind)],
}

impl DecoratorProfile {
    pub const TYPEORM: DecoratorProfile = DecoratorProfile {
        name: "typeorm",
        entity_marker: "@Entity",
        relations: &[
            ("OneToOne", RelationshipKind::OneToOne),
            ("OneToMany", RelationshipKind::OneToMany),
            ("ManyToOne", RelationshipKind::ManyToOne),
            ("ManyToMany", RelationshipKind::ManyToMany),
        ],
    };

    pub const SEQUELIZE: DecoratorProfile = DecoratorProfile {
        name: "sequelize",
        entity_marker: "@Table",
        relations: &[
            ("HasOne", RelationshipKind::OneToOne),
            ("HasMany", RelationshipKind::OneToMany),
            ("BelongsTo", RelationshipKind::ManyToOne),
            ("BelongsToMany", RelationshipKind::ManyToMany),
        ],
    };

    pub fn relationship_kind(&self, decorator: &str) -> Option<RelationshipKind> {
        self.relations
            .iter()
            .find(|(name, _)| *name == decorator)
            .map(|(_, kind)| *kind)
    }

    pub fn is_entity_file(&self, text: &str) -> bool {
        text.contains(self.entity_marker)
    }
}
