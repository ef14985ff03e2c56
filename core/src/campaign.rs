use crate::*;

/// Runs the level sequence and owns everything that outlives a level attempt.
#[derive(Debug)]
pub struct Campaign<S> {
    catalog: Catalog,
    config: EconomyConfig,
    current: usize,
    ledger: ResourceLedger,
    session: LevelSession,
    store: S,
    all_levels_complete: bool,
}

impl<S: ProgressStore> Campaign<S> {
    /// Restores saved progress from `store` and starts the current level.
    pub fn load(catalog: Catalog, config: EconomyConfig, store: S) -> Result<Self> {
        let saved = store.load().unwrap_or_else(|err| {
            log::warn!("Could not load saved progress, starting fresh: {:?}", err);
            SavedProgress::default()
        });

        let current = match saved.current_level_index {
            Some(index) if catalog.contains_index(index) => index,
            Some(index) => {
                log::warn!(
                    "Saved level index {} is outside the catalog ({} levels), starting at level 0",
                    index,
                    catalog.len()
                );
                0
            }
            None => 0,
        };

        let mut ledger = ResourceLedger::with_counts(
            &config,
            saved
                .global_free_undos_remaining
                .unwrap_or(config.starting_global_undos),
            saved.purchased_hammers.unwrap_or(0),
        );
        let session = LevelSession::new(catalog.get(current)?.clone(), &mut ledger)?;

        let mut campaign = Self {
            catalog,
            config,
            current,
            ledger,
            session,
            store,
            all_levels_complete: false,
        };
        if campaign.progress() != saved {
            campaign.persist();
        }
        Ok(campaign)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &EconomyConfig {
        &self.config
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_level(&self) -> &LevelDefinition {
        self.session.level()
    }

    pub fn ledger(&self) -> &ResourceLedger {
        &self.ledger
    }

    pub fn session(&self) -> &LevelSession {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_complete(&self) -> bool {
        self.all_levels_complete
    }

    pub fn progress(&self) -> SavedProgress {
        SavedProgress {
            current_level_index: Some(self.current),
            global_free_undos_remaining: Some(self.ledger.global_free_undos()),
            purchased_hammers: Some(self.ledger.purchased_hammers()),
        }
    }

    pub fn view(&self) -> SessionView {
        SessionView::from_campaign(self)
    }

    pub fn cell_clicked(&mut self, pos: Position) -> Result<ClickOutcome> {
        self.track(|c| c.session.on_cell_click(pos, &mut c.ledger))
    }

    pub fn toggle_hammer(&mut self) -> Result<ToggleOutcome> {
        self.session.toggle_hammer_mode(&self.ledger)
    }

    pub fn undo(&mut self) -> Result<()> {
        self.track(|c| c.session.undo(&mut c.ledger))
    }

    pub fn reset_level(&mut self) -> Result<()> {
        self.track(|c| c.session.reset(&mut c.ledger))
    }

    /// Moves on after a won level, or marks the campaign complete after the last one.
    pub fn next_level(&mut self) -> Result<AdvanceOutcome> {
        if self.session.state() != SessionState::Won {
            return Ok(AdvanceOutcome::NotWon);
        }

        let next = self.current + 1;
        if self.catalog.contains_index(next) {
            self.select_level(next)?;
            Ok(AdvanceOutcome::Advanced(next))
        } else {
            log::info!("All {} levels complete", self.catalog.len());
            self.all_levels_complete = true;
            self.session.set_feedback(Feedback::AllLevelsComplete);
            Ok(AdvanceOutcome::CampaignComplete)
        }
    }

    /// Starts a fresh attempt at `index`; out-of-range indices change nothing.
    pub fn select_level(&mut self, index: usize) -> Result<()> {
        let level = self.catalog.get(index)?.clone();
        self.track(|c| {
            c.session = LevelSession::new(level, &mut c.ledger)?;
            c.current = index;
            c.all_levels_complete = false;
            log::debug!("Selected level index {}", index);
            Ok(())
        })
    }

    /// Plays the campaign again from the first level.
    pub fn restart(&mut self) -> Result<()> {
        self.select_level(0)
    }

    pub fn purchase_undos(&mut self, n: u32) {
        self.track(|c| c.ledger.grant_global_undos(n));
    }

    pub fn purchase_hammers(&mut self, n: u32) {
        self.track(|c| c.ledger.grant_hammers(n));
    }

    /// Accepts the pending purchase prompt, granting one configured pack.
    pub fn confirm_purchase(&mut self) -> Option<PurchasePrompt> {
        let prompt = self.session.take_prompt()?;
        match prompt {
            PurchasePrompt::Undos => self.purchase_undos(self.config.undo_pack_size),
            PurchasePrompt::Hammers => self.purchase_hammers(self.config.hammer_pack_size),
        }
        Some(prompt)
    }

    pub fn dismiss_purchase(&mut self) -> Option<PurchasePrompt> {
        self.session.take_prompt()
    }

    /// Runs `action` and writes progress through if any persisted counter changed.
    fn track<T>(&mut self, action: impl FnOnce(&mut Self) -> T) -> T {
        let before = self.progress();
        let result = action(self);
        if self.progress() != before {
            self.persist();
        }
        result
    }

    fn persist(&mut self) {
        let progress = self.progress();
        log::trace!("saving progress: {:?}", progress);
        if let Err(err) = self.store.save(&progress) {
            log::error!("Could not save progress: {:?}", err);
        }
    }
}
