//! Tumbledice - an interactive 3D dice-rolling widget.
//!
//! The [`dice3d`] module holds the animation core (roll/settle state
//! machine, face resolver, drag controller) together with the Bevy
//! systems that render the cube and feed it input.

pub mod dice3d;
