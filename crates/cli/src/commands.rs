//! Command handlers. Each builds the store it needs, runs one operation and
//! prints plain-text output.

use std::sync::Arc;

use anyhow::{bail, Context};
use tokio::sync::broadcast;

use devtrack_client::{ApiClient, DeveloperService, EntityApi, ProjectService};
use devtrack_core::developer::{Developer, DeveloperPayload};
use devtrack_core::entity::Entity;
use devtrack_core::filter::{apply_filter, Filter};
use devtrack_core::project::{Project, ProjectPayload};
use devtrack_core::types::DbId;
use devtrack_state::{load_detail, EntityStore, Level, Notification, Notifier, RelationCounts};

use crate::args::{Command, DeveloperAction, ProjectAction};

pub async fn run(command: Command, client: Arc<ApiClient>) -> anyhow::Result<()> {
    let notifier = Arc::new(Notifier::default());
    let mut toasts = notifier.subscribe();
    let developers = Arc::new(DeveloperService::new(client.clone()));
    let projects = Arc::new(ProjectService::new(client));

    let result = dispatch(command, developers, projects, notifier).await;

    for line in pending_messages(&mut toasts, result.is_err()) {
        eprintln!("{line}");
    }
    result
}

async fn dispatch(
    command: Command,
    developers: Arc<DeveloperService>,
    projects: Arc<ProjectService>,
    notifier: Arc<Notifier>,
) -> anyhow::Result<()> {
    match command {
        Command::Developers { action } => match action {
            DeveloperAction::List(args) => {
                list(developers, notifier, &args.filter(), |dev: &Developer, count| {
                    format!(
                        "{:>5}  {:<30} {:>2}y  {:<8} {count} project(s)",
                        dev.id,
                        dev.full_name,
                        dev.years_experience,
                        dev.status.label()
                    )
                })
                .await
            }
            DeveloperAction::Show { id } => {
                let detail = load_detail(developers.as_ref(), id).await?;
                let dev = detail.entity;
                println!("#{} {} ({})", dev.id, dev.full_name, dev.status.label());
                println!("  national id  {}", dev.national_id);
                println!("  email        {}", dev.email);
                println!("  hired        {}", dev.hire_date);
                println!("  experience   {} years", dev.years_experience);
                print_related("projects", &detail.related);
                Ok(())
            }
            DeveloperAction::Create(args) => {
                let store = EntityStore::new(developers, notifier);
                let dev = store.create(&DeveloperPayload::from(args)).await?;
                println!("Created developer #{} {}", dev.id, dev.full_name);
                Ok(())
            }
            DeveloperAction::Update { id, fields } => {
                if fields.is_empty() {
                    bail!("nothing to update for developer {id}");
                }
                let store = EntityStore::new(developers, notifier);
                let current = store
                    .get_by_id(id)
                    .await
                    .with_context(|| format!("developer {id}"))?;
                let mut payload = DeveloperPayload::from(&current);
                fields.apply(&mut payload);
                let dev = store.update(id, &payload).await?;
                println!("Updated developer #{} {}", dev.id, dev.full_name);
                Ok(())
            }
            DeveloperAction::Deactivate { id } => deactivate(developers, notifier, id).await,
            DeveloperAction::Reactivate { id } => reactivate(developers, notifier, id).await,
        },
        Command::Projects { action } => match action {
            ProjectAction::List(args) => {
                list(projects, notifier, &args.filter(), |project: &Project, count| {
                    format!(
                        "{:>5}  {:<30} {} .. {}  {:<8} {count} developer(s)",
                        project.id,
                        project.name,
                        project.start_date,
                        project.end_date,
                        project.status.label()
                    )
                })
                .await
            }
            ProjectAction::Show { id } => {
                let detail = load_detail(projects.as_ref(), id).await?;
                let project = detail.entity;
                println!("#{} {} ({})", project.id, project.name, project.status.label());
                println!("  runs {} .. {}", project.start_date, project.end_date);
                print_related("developers", &detail.related);
                Ok(())
            }
            ProjectAction::Create(args) => {
                let store = EntityStore::new(projects, notifier);
                let project = store.create(&ProjectPayload::from(args)).await?;
                println!("Created project #{} {}", project.id, project.name);
                Ok(())
            }
            ProjectAction::Update { id, fields } => {
                if fields.is_empty() {
                    bail!("nothing to update for project {id}");
                }
                let store = EntityStore::new(projects, notifier);
                let current = store
                    .get_by_id(id)
                    .await
                    .with_context(|| format!("project {id}"))?;
                let mut payload = ProjectPayload::from(&current);
                fields.apply(&mut payload);
                let project = store.update(id, &payload).await?;
                println!("Updated project #{} {}", project.id, project.name);
                Ok(())
            }
            ProjectAction::Deactivate { id } => deactivate(projects, notifier, id).await,
            ProjectAction::Reactivate { id } => reactivate(projects, notifier, id).await,
        },
        Command::Assign { developer, project } => {
            let store = open(projects, notifier).await?;
            store.assign(developer, project).await?;
            println!("Developer {developer} assigned to project {project}");
            Ok(())
        }
        Command::Unassign { developer, project } => {
            let store = open(projects, notifier).await?;
            store.unassign(developer, project).await?;
            println!("Developer {developer} removed from project {project}");
            Ok(())
        }
    }
}

/// Open a store and surface a failed initial load as an error.
async fn open<A: EntityApi>(api: Arc<A>, notifier: Arc<Notifier>) -> anyhow::Result<EntityStore<A>> {
    let store = EntityStore::open(api, notifier).await;
    if let Some(message) = store.error() {
        bail!(message);
    }
    Ok(store)
}

async fn list<A, F>(
    api: Arc<A>,
    notifier: Arc<Notifier>,
    filter: &F,
    render: impl Fn(&A::Entity, usize) -> String,
) -> anyhow::Result<()>
where
    A: EntityApi,
    F: Filter<A::Entity>,
{
    let store = open(api, notifier).await?;
    let mut counts = RelationCounts::new();
    counts.refresh(&store).await;

    let items = store.items();
    let matched = apply_filter(&items, filter, counts.counts());
    for item in &matched {
        println!("{}", render(item, counts.count(item.id())));
    }
    println!(
        "{} of {} {}s{}",
        matched.len(),
        items.len(),
        A::Entity::KIND,
        if filter.is_active() { " (filtered)" } else { "" }
    );
    Ok(())
}

async fn deactivate<A: EntityApi>(api: Arc<A>, notifier: Arc<Notifier>, id: DbId) -> anyhow::Result<()> {
    let store = open(api, notifier).await?;
    store
        .deactivate(id)
        .await
        .with_context(|| format!("{} {id}", A::Entity::KIND))
}

async fn reactivate<A: EntityApi>(api: Arc<A>, notifier: Arc<Notifier>, id: DbId) -> anyhow::Result<()> {
    let store = open(api, notifier).await?;
    store
        .reactivate(id)
        .await
        .with_context(|| format!("{} {id}", A::Entity::KIND))?;
    Ok(())
}

fn print_related<R: Entity>(label: &str, related: &[R]) {
    if related.is_empty() {
        println!("  no {label} assigned");
        return;
    }
    println!("  {label}:");
    for item in related {
        println!("    #{} {} ({})", item.id(), item.name(), item.lifecycle().label());
    }
}

/// Lines for whatever the stores published while the command ran. When the
/// command failed its error is reported by the caller, so error toasts are
/// left out.
fn pending_messages(toasts: &mut broadcast::Receiver<Notification>, failed: bool) -> Vec<String> {
    let mut lines = Vec::new();
    while let Ok(toast) = toasts.try_recv() {
        match toast.level {
            Level::Success => lines.push(format!("ok: {}", toast.message)),
            Level::Error if !failed => lines.push(format!("error: {}", toast.message)),
            Level::Error => {}
        }
    }
    lines
}
