// This file is required to make `cargo test` discover tests in subdirectories.

#[cfg(test)]
mod common;

#[cfg(test)]
mod dom_to_model;

#[cfg(test)]
mod model_to_dom;

#[cfg(test)]
mod normalize;

#[cfg(test)]
mod roundtrip;
