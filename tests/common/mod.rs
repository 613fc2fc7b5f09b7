//! Shared fixtures for integration tests.

#![allow(dead_code)]

use ecl_core::RemoteHandle;
use ecl_library::memory::{MemoryItem, MemoryLibrary};
use ecl_metadata::{FieldDefinition, MetadataSchema};
use eclstub::StubProcessor;

pub const STUB_ID: &str = "tcm:5-123";

pub fn photo_handle() -> RemoteHandle {
    RemoteHandle::new(5, "mm", "photo-42", "file")
}

/// A fully described image item without metadata.
pub fn photo() -> MemoryItem {
    MemoryItem::multimedia(photo_handle())
        .display_type_id("image")
        .mime_type("image/jpeg")
        .filename("harbour.jpg")
        .template_fragment("<img src=\"https://cdn.example.com/harbour.jpg\" alt=\"\"/>")
        .direct_link("https://cdn.example.com/harbour.jpg")
}

/// Schema of the photo metadata documents used across tests.
pub fn photo_schema() -> MetadataSchema {
    MetadataSchema::new(vec![
        FieldDefinition::text("Title"),
        FieldDefinition::multi_line_text("Description"),
        FieldDefinition::xhtml("Credits"),
        FieldDefinition::text("Keyword"),
        FieldDefinition::number("Width"),
        FieldDefinition::date("Captured"),
        FieldDefinition::group(
            "Exif",
            vec![
                FieldDefinition::text("Make"),
                FieldDefinition::text("Model"),
                FieldDefinition::group("Lens", vec![FieldDefinition::number("FocalLength")]),
            ],
        ),
    ])
}

pub const PHOTO_METADATA: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Metadata xmlns="urn:example:photo">
  <Title>Harbour at dusk</Title>
  <Keyword>harbour</Keyword>
  <Description>Boats moored
in the old harbour.</Description>
  <Keyword>dusk</Keyword>
  <Credits><p>Photo by <b>A. Person</b></p></Credits>
  <Width>4032</Width>
  <Captured>2023-09-14T19:42:05</Captured>
  <Exif>
    <Model>X-T4</Model>
    <Make>Fujifilm</Make>
    <Lens><FocalLength>23</FocalLength></Lens>
  </Exif>
  <Unmapped>ignored</Unmapped>
</Metadata>"#;

/// A library holding the photo under [`STUB_ID`], plus a processor over it.
pub fn processor_with(item: MemoryItem) -> (MemoryLibrary, StubProcessor<MemoryLibrary>) {
    let library = MemoryLibrary::new();
    library.register(STUB_ID, item);
    let processor = StubProcessor::new(library.clone());
    (library, processor)
}
