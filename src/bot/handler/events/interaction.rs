use serenity::all::{Context, Interaction};

use super::{super::Handler, error::HandlerResult};

impl Handler {
    pub async fn on_interaction(
        &self,
        ctx: Context,
        interaction: Interaction,
    ) -> HandlerResult<'static, ()> {
        let Some(component) = interaction.into_message_component() else {
            return HandlerResult::ok(());
        };

        let result = match component.data.custom_id.as_str() {
            "clear_history" => self.clear_history(&component, &ctx).await,
            "delete_error" => self.delete_error(&component, &ctx).await,
            _ => {
                log::warn!(
                    "unknown custom_id \"{:?}\", ignoring",
                    component.data.custom_id
                );
                Ok(())
            }
        };

        match result {
            Ok(_) => HandlerResult::ok(()),
            Err(why) => HandlerResult::err(why, (ctx.http, *component.message)),
        }
    }
}
