use pixel_runner::{
    AssetManifest, AssetRegistry, DrawList, GameConfig, GameEngine, GameState, HighScores,
    InputEvent, LeaderboardEntry, ScoreStore, SessionStore,
};
#[cfg(feature = "vectors")]
use pixel_runner::VectorCanvas;

/// Owns the engine and the per-frame output buffers the host reads back.
///
/// The crate keeps one runner in a `thread_local!` and exports free functions via
/// `#[wasm_bindgen]`, because wasm-bindgen cannot export generic structs directly.
pub struct GameRunner {
    engine: GameEngine<SessionStore>,
    draw_list: DrawList,
    #[cfg(feature = "vectors")]
    canvas: VectorCanvas,
    scores: HighScores,
    /// Flat buffer of sound event IDs for direct memory reads.
    sound_buffer: Vec<u8>,
    run_recorded: bool,
}

impl GameRunner {
    pub fn new(config: GameConfig) -> Self {
        let store = SessionStore::new(config.starting_lives);
        Self {
            engine: GameEngine::new(config, store),
            draw_list: DrawList::new(),
            #[cfg(feature = "vectors")]
            canvas: VectorCanvas::new(),
            scores: HighScores::default(),
            sound_buffer: Vec::with_capacity(64),
            run_recorded: false,
        }
    }

    // ---- Session control ----

    pub fn start(&mut self, now_ms: f64) {
        self.engine.store_mut().start_game();
        self.engine.restart();
        self.engine.start(now_ms);
        self.run_recorded = false;
    }

    pub fn pause(&mut self) {
        self.engine.store_mut().pause_game();
        self.engine.pause();
    }

    pub fn resume(&mut self, now_ms: f64) {
        self.engine.store_mut().resume_game();
        self.engine.resume(now_ms);
    }

    pub fn restart(&mut self, now_ms: f64) {
        self.engine.stop();
        self.engine.store_mut().restart_game();
        self.engine.restart();
        self.engine.start(now_ms);
        self.run_recorded = false;
    }

    /// Back to the title screen. The world keeps rendering behind the menu.
    pub fn menu(&mut self) {
        self.engine.store_mut().go_to_menu();
        self.engine.restart();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.engine.resize(width, height);
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.engine.push_input(event);
    }

    /// Run one animation frame and rebuild every output buffer.
    ///
    /// `today` formats the date stamped on a leaderboard entry; it is only called on the
    /// frame a run ends.
    pub fn frame(&mut self, now_ms: f64, today: impl FnOnce() -> String) {
        self.engine.frame(now_ms);

        let store = self.engine.store();
        if store.state() == GameState::GameOver && !self.run_recorded {
            let entry = LeaderboardEntry {
                score: store.score(),
                time: store.game_time(),
                date: today(),
            };
            if self.scores.submit(entry) {
                log::info!("new record: {}", self.scores.high_score);
            }
            self.run_recorded = true;
        }

        self.render();

        self.sound_buffer.clear();
        for sound in self.engine.drain_sounds() {
            self.sound_buffer.push(sound.id());
        }
    }

    fn render(&mut self) {
        let config = self.engine.config();
        let (width, height) = (config.viewport_width, config.viewport_height);

        self.draw_list.reset();
        self.engine.draw(&mut self.draw_list, width, height);

        #[cfg(feature = "vectors")]
        self.engine.draw(&mut self.canvas, width, height);
    }

    // ---- Assets ----

    pub fn load_manifest(&mut self, json: &str) -> bool {
        match AssetManifest::from_json(json) {
            Ok(manifest) => {
                log::info!(
                    "manifest: {} images, {} sounds",
                    manifest.images.len(),
                    manifest.sounds.len()
                );
                self.draw_list.set_assets(AssetRegistry::from_manifest(&manifest));
                true
            }
            Err(e) => {
                log::warn!("failed to parse asset manifest: {}", e);
                false
            }
        }
    }

    pub fn mark_asset_ready(&mut self, name: &str) -> bool {
        self.draw_list.assets_mut().mark_ready(name)
    }

    // ---- Persistence ----

    /// Load the persisted high score table. Malformed data is ignored.
    pub fn load_high_scores(&mut self, json: &str) -> bool {
        match HighScores::from_json(json) {
            Ok(scores) => {
                self.engine.store_mut().set_high_score(scores.high_score);
                self.scores = scores;
                true
            }
            Err(e) => {
                log::warn!("ignoring stored high scores: {}", e);
                false
            }
        }
    }

    pub fn high_scores_json(&self) -> String {
        self.scores.to_json().unwrap_or_else(|e| {
            log::error!("failed to serialize high scores: {}", e);
            String::from("{}")
        })
    }

    // ---- Data accessors ----

    pub fn draw_commands_json(&self) -> String {
        self.draw_list.to_json().unwrap_or_else(|e| {
            log::error!("failed to serialize draw list: {}", e);
            String::from("[]")
        })
    }

    pub fn hud_json(&self) -> String {
        self.engine.snapshot().to_json().unwrap_or_else(|e| {
            log::error!("failed to serialize HUD snapshot: {}", e);
            String::from("{}")
        })
    }

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn sound_events(&self) -> &[u8] {
        &self.sound_buffer
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    pub fn engine(&self) -> &GameEngine<SessionStore> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut GameEngine<SessionStore> {
        &mut self.engine
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertices_ptr(&self) -> *const f32 {
        self.canvas.buffer_ptr()
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertex_count(&self) -> u32 {
        self.canvas.vertex_count() as u32
    }
}
