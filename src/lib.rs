mod diagram;
mod error;
mod handler;
mod model;
mod revealator;
mod transfer;
mod wasm;


pub use diagram::DiagramAggregator;
pub use error::{DecodeError, NotFound};
pub use handler::{HandlerConfig, TransferObjectHandler};
pub use model::{Content, Link, Member, MemberType, Method, Value};
pub use revealator::{ObjectList, Revealator};
pub use transfer::{
    DomainType, DomainTypeExtensions, Property, PropertyExtensions, TObject, TransferObject,
};
pub use wasm::{DiagramSession, decode_document};

/// Decode one document with the default, lenient handler.
pub fn parse_document(document: &str) -> Result<TransferObject, DecodeError> {
    TransferObjectHandler::new().parse(document)
}

/// Decode a batch of documents into one diagram session.
///
/// Stops at the first document that fails to decode; the documents before it
/// are not returned.
pub fn collect_diagram<'a>(
    title: &str,
    number_of_classes: i32,
    documents: impl IntoIterator<Item = &'a str>,
) -> Result<DiagramAggregator, DecodeError> {
    let handler = TransferObjectHandler::new();
    let mut diagram = DiagramAggregator::new(title);
    diagram.set_number_of_classes(number_of_classes);
    for document in documents {
        diagram.add_data(handler.parse(document)?);
    }
    Ok(diagram)
}
