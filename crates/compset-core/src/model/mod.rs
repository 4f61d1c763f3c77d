//! Data model for component set definitions
//!
//! The raw types mirror `components-definition.json` and are produced by
//! serde after the definition passed schema validation. The parsed types are
//! built by the [`DefinitionParser`](crate::parser::DefinitionParser) and are
//! read-only once constructed.

pub mod control;
pub mod definition;
pub mod parsed;
pub mod reference;

pub use control::{Control, ControlOption, DataType};
pub use definition::{
    Autofill, ChildProperties, ChildRestriction, ComponentDefinition, ComponentGroup,
    ComponentProperty, ComponentsDefinition, ConversionKind, ConversionRule,
    ConversionShortcuts, CustomStyle, DirectiveMapping, DirectiveOption, Label, Shortcuts,
};
pub use parsed::{ParsedComponent, ParsedComponentSet, ParsedProperty};
pub use reference::PropertyReference;
