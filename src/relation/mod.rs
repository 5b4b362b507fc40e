// SPDX-License-Identifier: MIT OR Apache-2.0

//! Clone relation input: fragment identities, pair records, file ingestion.

pub mod fragment;
pub mod pair;
pub mod reader;

pub use fragment::{normalize_path, FragmentId};
pub use pair::{ClonePairRecord, CloneType};
pub use reader::{parse_relations, read_relation_file};
