//! Traits describing the external collaborators this core consumes.
//!
//! Oracles expose terrain geometry, ray queries, and actor transforms. The
//! [`Env`] aggregate bundles them so every operation can reach the world it
//! needs without hard coupling to concrete implementations, and without the
//! lazily cached back-references the original design grew around.
mod actors;
mod error;
mod path;
mod ray;
mod terrain;

pub use actors::ActorOracle;
pub use error::OracleError;
pub use path::PathFollower;
pub use ray::RayOracle;
pub use terrain::TerrainOracle;

/// Aggregates the read-only oracles required by perception, belief, and
/// spatial reasoning. Wired once by an external composition step; no
/// operation resolves collaborators lazily.
#[derive(Clone, Copy, Debug)]
pub struct Env<'a, T, R, A>
where
    T: TerrainOracle + ?Sized,
    R: RayOracle + ?Sized,
    A: ActorOracle + ?Sized,
{
    terrain: Option<&'a T>,
    ray: Option<&'a R>,
    actors: Option<&'a A>,
}

pub type TacticalEnv<'a> = Env<'a, dyn TerrainOracle + 'a, dyn RayOracle + 'a, dyn ActorOracle + 'a>;

impl<'a, T, R, A> Env<'a, T, R, A>
where
    T: TerrainOracle + ?Sized,
    R: RayOracle + ?Sized,
    A: ActorOracle + ?Sized,
{
    pub fn new(terrain: Option<&'a T>, ray: Option<&'a R>, actors: Option<&'a A>) -> Self {
        Self {
            terrain,
            ray,
            actors,
        }
    }

    pub fn with_all(terrain: &'a T, ray: &'a R, actors: &'a A) -> Self {
        Self::new(Some(terrain), Some(ray), Some(actors))
    }

    pub fn empty() -> Self {
        Self {
            terrain: None,
            ray: None,
            actors: None,
        }
    }

    /// Returns the TerrainOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::TerrainNotAvailable` if no terrain oracle was provided.
    pub fn terrain(&self) -> Result<&'a T, OracleError> {
        self.terrain.ok_or(OracleError::TerrainNotAvailable)
    }

    /// Returns the RayOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::RayNotAvailable` if no ray oracle was provided.
    pub fn ray(&self) -> Result<&'a R, OracleError> {
        self.ray.ok_or(OracleError::RayNotAvailable)
    }

    /// Returns the ActorOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ActorsNotAvailable` if no actor oracle was provided.
    pub fn actors(&self) -> Result<&'a A, OracleError> {
        self.actors.ok_or(OracleError::ActorsNotAvailable)
    }
}

impl<'a, T, R, A> Env<'a, T, R, A>
where
    T: TerrainOracle + 'a,
    R: RayOracle + 'a,
    A: ActorOracle + 'a,
{
    /// Converts this environment into a trait-object based [`TacticalEnv`].
    pub fn as_tactical_env(&self) -> TacticalEnv<'a> {
        let terrain: Option<&'a dyn TerrainOracle> = self.terrain.map(|t| t as _);
        let ray: Option<&'a dyn RayOracle> = self.ray.map(|r| r as _);
        let actors: Option<&'a dyn ActorOracle> = self.actors.map(|a| a as _);
        Env::new(terrain, ray, actors)
    }
}
