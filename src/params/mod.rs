// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Region parameters: typed values, creation-parameter maps and the text
//! form used by the default get/set path.

mod map;
mod value;

pub use map::{parse_parameters, RawParameters, ValueMap};
pub use value::ParameterValue;
