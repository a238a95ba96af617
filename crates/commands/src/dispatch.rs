use tracing::{debug, warn};

use codebot_config::{CodebotConfig, SharedConfig};

use crate::parse::parse;

/// Who issued a command, and where.
#[derive(Debug, Clone)]
pub struct CommandOrigin {
    pub author_id: String,
    pub channel_id: String,
}

/// What a handler did: the reply to post, and whether the configuration
/// changed (and therefore needs saving).
struct CommandEffect {
    reply: String,
    mutated: bool,
}

impl CommandEffect {
    fn reply(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            mutated: false,
        }
    }

    fn mutation(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            mutated: true,
        }
    }
}

type Handler = fn(&mut CodebotConfig, &CommandOrigin, &[String]) -> CommandEffect;

struct CommandSpec {
    name: &'static str,
    admin: bool,
    handler: Handler,
}

static COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "chadd",
        admin: true,
        handler: chadd,
    },
    CommandSpec {
        name: "chdel",
        admin: true,
        handler: chdel,
    },
    CommandSpec {
        name: "chlist",
        admin: true,
        handler: chlist,
    },
    CommandSpec {
        name: "promote",
        admin: true,
        handler: promote,
    },
    CommandSpec {
        name: "demote",
        admin: true,
        handler: demote,
    },
    CommandSpec {
        name: "prset",
        admin: true,
        handler: prset,
    },
    CommandSpec {
        name: "admins",
        admin: true,
        handler: admins,
    },
    CommandSpec {
        name: "ahelp",
        admin: true,
        handler: ahelp,
    },
    CommandSpec {
        name: "help",
        admin: false,
        handler: help,
    },
];

/// Handle one potential command message.
///
/// Returns `None` when `text` is not a command at all, `Some(reply)`
/// otherwise. The whole read-modify-write-save sequence runs inside one
/// write lock with no await points, so two commands can never interleave
/// their list mutations. A failed save is reported in the reply but the
/// in-memory mutation stands.
pub fn dispatch(store: &SharedConfig, origin: &CommandOrigin, text: &str) -> Option<String> {
    let parsed = parse(text)?;
    let Some(spec) = COMMANDS.iter().find(|c| c.name == parsed.name) else {
        debug!(command = %parsed.name, "command not found");
        return Some("Command not found".into());
    };

    let mut guard = store.write().unwrap_or_else(|e| e.into_inner());
    if spec.admin && !guard.config().admins.iter().any(|a| a == &origin.author_id) {
        warn!(
            command = spec.name,
            author_id = %origin.author_id,
            "permission denied"
        );
        return Some("This command requires admin permissions".into());
    }

    let effect = (spec.handler)(guard.config_mut(), origin, &parsed.args);
    debug!(
        command = spec.name,
        channel_id = %origin.channel_id,
        mutated = effect.mutated,
        "command handled"
    );

    if effect.mutated
        && let Err(e) = guard.save()
    {
        warn!(command = spec.name, error = %e, "config save failed, keeping in-memory change");
        return Some(format!(
            "{}\nWarning: saving the configuration failed: {e}",
            effect.reply
        ));
    }
    Some(effect.reply)
}

// ── Handlers ────────────────────────────────────────────────────────────────

fn chadd(config: &mut CodebotConfig, origin: &CommandOrigin, _args: &[String]) -> CommandEffect {
    if config.channels.iter().any(|c| c == &origin.channel_id) {
        return CommandEffect::reply("Channel is already added!");
    }
    config.channels.push(origin.channel_id.clone());
    CommandEffect::mutation("Channel added!")
}

fn chdel(config: &mut CodebotConfig, origin: &CommandOrigin, _args: &[String]) -> CommandEffect {
    let Some(index) = config.channels.iter().position(|c| c == &origin.channel_id) else {
        return CommandEffect::reply("Channel is not added, nothing to remove.");
    };
    config.channels.remove(index);
    CommandEffect::mutation("Channel removed!")
}

fn chlist(config: &mut CodebotConfig, _origin: &CommandOrigin, _args: &[String]) -> CommandEffect {
    CommandEffect::reply(format!(
        "List of CodeBot channels:\n{}",
        config.channels.join("\n")
    ))
}

fn promote(config: &mut CodebotConfig, _origin: &CommandOrigin, args: &[String]) -> CommandEffect {
    let Some(user_id) = args.first() else {
        return CommandEffect::reply("Usage: !codebot promote [id]");
    };
    if config.admins.iter().any(|a| a == user_id) {
        return CommandEffect::reply("User is already an admin!");
    }
    config.admins.push(user_id.clone());
    CommandEffect::mutation("User promoted!")
}

fn demote(config: &mut CodebotConfig, _origin: &CommandOrigin, args: &[String]) -> CommandEffect {
    let Some(user_id) = args.first() else {
        return CommandEffect::reply("Usage: !codebot demote [id]");
    };
    let Some(index) = config.admins.iter().position(|a| a == user_id) else {
        return CommandEffect::reply("User is not an admin, nothing to change.");
    };
    config.admins.remove(index);
    CommandEffect::mutation("User demoted!")
}

fn prset(config: &mut CodebotConfig, origin: &CommandOrigin, args: &[String]) -> CommandEffect {
    let Some(name) = args.first() else {
        return CommandEffect::reply("Usage: !codebot prset [name]");
    };
    // Binding clears the previous owner even when the name does not
    // match, so a failed prset still saves.
    match codebot_projects::bind(config, &origin.channel_id, name) {
        Some(project) => CommandEffect::mutation(format!(
            "Project for this channel is set to \"{}\"!",
            project.name
        )),
        None => CommandEffect::mutation("Project not found, using empty project."),
    }
}

fn admins(config: &mut CodebotConfig, _origin: &CommandOrigin, _args: &[String]) -> CommandEffect {
    CommandEffect::reply(format!(
        "List of CodeBot admins:\n{}",
        config.admins.join("\n")
    ))
}

fn ahelp(_config: &mut CodebotConfig, _origin: &CommandOrigin, _args: &[String]) -> CommandEffect {
    CommandEffect::reply(
        "CodeBot admin help\n\
         !codebot chadd - Adds the current channel to CodeBot\n\
         !codebot chdel - Removes the current channel from CodeBot\n\
         !codebot chlist - Lists channels added to CodeBot\n\
         !codebot promote [id] - Sets user as admin\n\
         !codebot demote [id] - Removes the user from admins\n\
         !codebot admins - Lists all the admins of CodeBot\n\
         !codebot prset [name] - Sets the project to use for current channel\n\
         !codebot ahelp - Shows this page\n\
         !codebot help - Shows user help page",
    )
}

fn help(_config: &mut CodebotConfig, _origin: &CommandOrigin, _args: &[String]) -> CommandEffect {
    CommandEffect::reply(
        "CodeBot help\n\
         Just send me your code and I'll format it and check it for any errors!\n\
         !codebot help - Shows this page\n\
         !codebot ahelp - Shows admin help page",
    )
}
