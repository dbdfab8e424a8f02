use super::*;

/// Stdin and stdout for the delete confirmation; `None` when stdin is not a
/// terminal.
pub(super) type Prompt<'a> = Option<(&'a mut dyn BufRead, &'a mut dyn Write)>;

pub(super) async fn handle_list(
    args: ListArgs,
    config: &AdminConfig,
    api: &dyn AdminApi,
    audit: &AuditLogger,
) -> anyhow::Result<()> {
    let json = args.json;
    let mut page = AdminPage::from_config(config);
    if let Some(prefix) = args.prefix.as_deref() {
        page.set_prefix(prefix);
    }
    let context = AuditContext::for_listing(&page.prefix, config.host_override.as_deref());
    let result: anyhow::Result<()> = async {
        page.refresh(api)
            .await
            .map_err(|err| map_api_error(err, "repo list"))?;
        if json {
            println!(
                "{}",
                serde_json::to_string_pretty(&page.repos).context("serialize repos")?
            );
        } else {
            for line in render_listing(&page.repos) {
                println!("{line}");
            }
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    match &result {
        Ok(()) => {
            audit.record("repo.list", AuditStatus::Ok, context, None, None)?;
        }
        Err(err) => {
            let _ = audit.record(
                "repo.list",
                AuditStatus::Failed,
                context,
                None,
                Some(&format!("{err:#}")),
            );
        }
    }
    result
}

pub(super) async fn handle_create(
    args: CreateArgs,
    config: &AdminConfig,
    api: &dyn AdminApi,
    audit: &AuditLogger,
) -> anyhow::Result<()> {
    let mut page = AdminPage::from_config(config);
    page.open_create();
    page.draft = args.draft();
    let import_root = page.draft.import_root.trim().to_string();
    let context = AuditContext::for_repo(&import_root, config.host_override.as_deref());

    let result = match page.create(api).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(anyhow::anyhow!(
            page.status
                .clone()
                .unwrap_or_else(|| format!("{import_root} was not created"))
        )),
        Err(err) => Err(map_api_error(err, &import_root)),
    };

    match result {
        Ok(()) => {
            let audit_id = audit.record("repo.create", AuditStatus::Ok, context, None, None)?;
            println!("Created {import_root}. Audit ID: {audit_id}");
            Ok(())
        }
        Err(err) => {
            let _ = audit.record(
                "repo.create",
                AuditStatus::Failed,
                context,
                None,
                Some(&format!("{err:#}")),
            );
            Err(err)
        }
    }
}

pub(super) async fn handle_delete(
    args: DeleteArgs,
    config: &AdminConfig,
    api: &dyn AdminApi,
    audit: &AuditLogger,
    prompt: Prompt<'_>,
) -> anyhow::Result<()> {
    let id = args.id.trim().to_string();
    if id.is_empty() {
        anyhow::bail!("descriptor id must not be empty");
    }
    let yes = args.yes;
    if !yes && prompt.is_none() {
        anyhow::bail!("refusing to delete {id} without --yes in non-interactive mode");
    }
    let context = AuditContext::for_repo(&id, config.host_override.as_deref());

    let mut page = AdminPage::from_config(config);
    let mut prompt_error = None;
    let result = page
        .delete(api, &id, |question| {
            if yes {
                return true;
            }
            let Some((input, output)) = prompt else {
                return false;
            };
            match prompt_yes_no(question, input, output) {
                Ok(answer) => answer,
                Err(err) => {
                    prompt_error = Some(err);
                    false
                }
            }
        })
        .await;
    if let Some(err) = prompt_error {
        return Err(err).context("read confirmation");
    }

    match result {
        Ok(true) => {
            let audit_id = audit.record("repo.delete", AuditStatus::Ok, context, None, None)?;
            println!("Deleted {id}. Audit ID: {audit_id}");
            Ok(())
        }
        Ok(false) => {
            let audit_id = audit.record(
                "repo.delete",
                AuditStatus::Skipped,
                context,
                None,
                Some("declined"),
            )?;
            println!("Delete cancelled. Audit ID: {audit_id}");
            Ok(())
        }
        Err(err) => {
            let err = map_api_error(err, &id);
            let _ = audit.record(
                "repo.delete",
                AuditStatus::Failed,
                context,
                None,
                Some(&format!("{err:#}")),
            );
            Err(err)
        }
    }
}
