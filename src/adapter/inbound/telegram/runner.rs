//! Long-polling Telegram client around [`BotControl`].
//!
//! Requires the `telegram` feature to be enabled.

use std::future::Future;
use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{
    BotCommand, InlineKeyboardButton, InlineKeyboardMarkup, ParseMode, WebAppInfo,
};
use tracing::{error, info, warn};
use url::Url;

use super::command::bot_commands;
use super::control::{BotControl, Reply, Sender};
use super::keyboard::{Button, Keyboard};

/// Poll Telegram until `shutdown` resolves.
pub async fn run_bot<F>(
    token: &str,
    control: Arc<BotControl>,
    drop_pending_updates: bool,
    shutdown: F,
) where
    F: Future<Output = ()> + Send,
{
    let bot = Bot::new(token);

    if let Err(e) = bot
        .delete_webhook()
        .drop_pending_updates(drop_pending_updates)
        .await
    {
        warn!(error = %e, "Failed to clear Telegram webhook");
    }
    if let Err(e) = register_bot_commands(&bot).await {
        warn!(error = %e, "Failed to register bot commands with Telegram");
    }

    info!(
        admins = control.admins().len(),
        open = control.admins().is_open(),
        "Telegram bot started"
    );

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback));

    let mut dispatcher = Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![control])
        .default_handler(|_| async {})
        .build();

    tokio::select! {
        () = dispatcher.dispatch() => warn!("Telegram dispatcher stopped"),
        () = shutdown => info!("Telegram bot shutting down"),
    }
}

async fn on_message(bot: Bot, msg: Message, control: Arc<BotControl>) -> ResponseResult<()> {
    let (Some(text), Some(user)) = (msg.text(), msg.from.as_ref()) else {
        return Ok(());
    };
    let sender = Sender {
        chat_id: msg.chat.id.0,
        user_id: user.id.0,
    };

    if let Some(reply) = control.handle_text(sender, text).await {
        send_reply(&bot, msg.chat.id, reply).await;
    }
    Ok(())
}

async fn on_callback(bot: Bot, q: CallbackQuery, control: Arc<BotControl>) -> ResponseResult<()> {
    if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
        warn!(error = %e, "Failed to answer callback query");
    }

    let (Some(data), Some(message)) = (q.data.as_deref(), q.message.as_ref()) else {
        return Ok(());
    };
    let chat_id = message.chat().id;
    let sender = Sender {
        chat_id: chat_id.0,
        user_id: q.from.id.0,
    };

    let reply = control.handle_callback(sender, data).await;
    send_reply(&bot, chat_id, reply).await;
    Ok(())
}

async fn send_reply(bot: &Bot, chat_id: ChatId, reply: Reply) {
    let mut request = bot
        .send_message(chat_id, reply.text)
        .parse_mode(ParseMode::Html);
    if let Some(keyboard) = reply.keyboard {
        request = request.reply_markup(inline_markup(&keyboard));
    }
    if let Err(e) = request.await {
        error!(error = %e, chat_id = chat_id.0, "Failed to send Telegram reply");
    }
}

fn inline_markup(keyboard: &Keyboard) -> InlineKeyboardMarkup {
    let rows = keyboard.rows().iter().map(|row| {
        row.iter()
            .filter_map(|button| match button {
                Button::Callback { label, action } => {
                    Some(InlineKeyboardButton::callback(*label, action.as_str()))
                }
                Button::WebApp { label, url } => match Url::parse(url) {
                    Ok(url) => Some(InlineKeyboardButton::web_app(*label, WebAppInfo { url })),
                    Err(e) => {
                        warn!(error = %e, url, "Skipping web app button with invalid URL");
                        None
                    }
                },
            })
            .collect::<Vec<_>>()
    });
    InlineKeyboardMarkup::new(rows)
}

/// Register bot commands with Telegram for the "/" menu.
async fn register_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    let commands: Vec<BotCommand> = bot_commands()
        .into_iter()
        .map(|(cmd, desc)| BotCommand::new(cmd, desc))
        .collect();

    bot.set_my_commands(commands).await?;
    info!("Registered bot commands with Telegram");
    Ok(())
}
