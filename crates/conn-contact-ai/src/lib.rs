//! Contact behavior AI.
//!
//! Pure functions that compute course/speed updates for autonomous contacts
//! based on their behavior profile and the tactical situation. No ECS
//! dependency — operates on plain data. The manual-override arbitration
//! (`AiControl`) lives in the engine; this crate only decides what an
//! autonomous contact does next.

pub mod fsm;
pub mod profiles;

#[cfg(test)]
mod tests;
