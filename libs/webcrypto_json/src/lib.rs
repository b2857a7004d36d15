// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
pub mod escape;
pub mod parse;
pub mod value;

pub use parse::{parse_object, ParseError};
pub use value::{JsonObject, JsonValue};
