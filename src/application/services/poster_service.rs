//! Poster service - Selects a mob, generates its poster and posts it to a chat
//!
//! Both the scheduler and the on-demand command go through
//! [`PosterService::produce_and_post`]; no other path selects, prompts,
//! generates or delivers.

use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::application::dto::PostOutcome;
use crate::application::ports::outbound::{DeliveryPort, ImageGenerationPort};
use crate::application::services::prompt_builder::{build_caption, build_prompt, PosterStyle};
use crate::domain::entities::Roster;
use crate::domain::services::{SelectionNotFound, Selector};
use crate::domain::value_objects::SelectionResult;

pub struct PosterService {
    roster: Arc<Roster>,
    selector: Selector,
    style: PosterStyle,
    image_generator: Arc<dyn ImageGenerationPort>,
    delivery: Arc<dyn DeliveryPort>,
}

impl PosterService {
    pub fn new(
        roster: Arc<Roster>,
        selector: Selector,
        style: PosterStyle,
        image_generator: Arc<dyn ImageGenerationPort>,
        delivery: Arc<dyn DeliveryPort>,
    ) -> Self {
        Self {
            roster,
            selector,
            style,
            image_generator,
            delivery,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Produce one poster and post it to `chat_id`
    ///
    /// Every failure is folded into the returned outcome; callers only log or
    /// relay it.
    #[instrument(skip(self))]
    pub async fn produce_and_post(
        &self,
        chat_id: &str,
        interval_hours: f64,
        name_override: Option<&str>,
    ) -> PostOutcome {
        let selection = match self.select(interval_hours, name_override) {
            Ok(selection) => selection,
            Err(e) => {
                warn!("Selection failed: {}", e);
                return PostOutcome::failed(e.to_string());
            }
        };
        info!(
            chat_id = %chat_id,
            mob_id = %selection.entry.id,
            variant = selection.is_variant,
            "Generating MegaGrok poster for {}",
            selection.entry.display_name
        );

        let prompt = build_prompt(&selection.entry, selection.is_variant, &self.style);

        let image = match self.image_generator.generate(&prompt).await {
            Ok(image) => image,
            Err(e) => {
                error!(
                    chat_id = %chat_id,
                    mob_id = %selection.entry.id,
                    "Poster generation failed: {}",
                    e
                );
                return PostOutcome::failed(e.to_string());
            }
        };

        let caption = build_caption(&selection);
        let filename = image.filename;
        if self
            .delivery
            .deliver(chat_id, image.bytes, &filename, &caption)
            .await
        {
            info!(
                chat_id = %chat_id,
                mob_id = %selection.entry.id,
                "Posted {}",
                selection.entry.display_name
            );
            PostOutcome::posted(selection.entry.display_name)
        } else {
            PostOutcome::failed(format!(
                "Telegram rejected or did not receive the {} poster for chat {}",
                selection.entry.display_name, chat_id
            ))
        }
    }

    fn select(
        &self,
        interval_hours: f64,
        name_override: Option<&str>,
    ) -> Result<SelectionResult, SelectionNotFound> {
        match name_override.map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) => self.selector.pick_by_override(&self.roster, name),
            None => Ok(self.selector.pick_for_occasion(&self.roster, interval_hours)),
        }
    }
}
