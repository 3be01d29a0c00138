//! Simulation driver holding the current generation.

use crate::command::Command;
use crate::engine::TransitionEngine;
use crate::grid::Grid;
use life_core::{Census, Error, Result, Species, WorldConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, event, info, instrument, Level};

pub struct Simulation {
    grid: Grid,
    engine: TransitionEngine,
    config: WorldConfig,
    rng: ChaCha8Rng,
    paused: bool,
    placement: Species,
    generation: u64,
}

impl Simulation {
    pub fn new(config: WorldConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let grid = Grid::create(config.width, config.height, config.randomize_on_start, &mut rng)?;
        let engine = TransitionEngine::from_config(&config);

        info!(
            event = "simulation_created",
            width = config.width,
            height = config.height,
            seed = config.seed,
            shrinker_reach = ?config.shrinker_reach,
            "Simulation created"
        );

        Ok(Self {
            grid,
            engine,
            config,
            rng,
            paused: false,
            placement: Species::Normal,
            generation: 0,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn placement(&self) -> Species {
        self.placement
    }

    pub fn census(&self) -> Census {
        self.grid.census()
    }

    /// Apply one driver command
    pub fn apply(&mut self, command: Command) -> Result<()> {
        debug!(event = "command", command = %command, generation = self.generation, "Applying command");

        match command {
            Command::Randomize => self.reset(true)?,
            Command::Clear => self.reset(false)?,
            Command::TogglePause => {
                self.paused = !self.paused;
                info!(paused = self.paused, "Pause toggled");
            }
            Command::Select(species) => {
                if species == Species::Empty {
                    return Err(Error::InvalidCommand(
                        "cannot place the empty species".to_string(),
                    ));
                }
                self.placement = species;
            }
            Command::Place(pos) => self.grid.toggle(pos, self.placement),
            Command::Advance => self.advance(),
        }

        Ok(())
    }

    /// Advance one generation unless paused; returns whether it advanced
    pub fn tick(&mut self) -> bool {
        if self.paused {
            return false;
        }
        self.advance();
        true
    }

    /// Advance one generation regardless of the pause flag
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn advance(&mut self) {
        self.grid = self.engine.step(&self.grid, &mut self.rng);
        self.generation += 1;
    }

    fn reset(&mut self, randomize: bool) -> Result<()> {
        self.grid = Grid::create(self.config.width, self.config.height, randomize, &mut self.rng)?;
        self.generation = 0;
        info!(event = "grid_reset", randomize, "Grid replaced");
        Ok(())
    }

    /// Emit a population snapshot for the current generation
    pub fn emit_population_metrics(&self) {
        let census = self.census();

        info!(
            event = "population_metrics",
            generation = self.generation,
            alive = census.alive(),
            density = format!("{:.3}", census.density()),
            normal = census.count(Species::Normal),
            immortal = census.count(Species::Immortal),
            ephemeral = census.count(Species::Ephemeral),
            viral = census.count(Species::Viral),
            shrinker = census.count(Species::Shrinker),
            spreader = census.count(Species::Spreader),
            blinker = census.count(Species::Blinker),
            "Population metrics snapshot"
        );

        event!(
            Level::INFO,
            gauge_name = "population_alive",
            gauge_value = census.alive(),
            generation = self.generation,
            "Population gauge"
        );

        for (species, count) in census.iter().filter(|(species, _)| species.is_alive()) {
            event!(
                Level::DEBUG,
                gauge_name = "population_species",
                gauge_value = count,
                species = %species,
                generation = self.generation,
                "Species gauge"
            );
        }
    }
}
