//! Command-line surface.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use devtrack_core::dates::parse_date;
use devtrack_core::developer::DeveloperPayload;
use devtrack_core::filter::{DeveloperFilter, ProjectFilter, StatusFilter};
use devtrack_core::project::ProjectPayload;
use devtrack_core::types::DbId;

#[derive(Debug, Parser)]
#[command(name = "devtrack", version, about = "Developer and project dashboard client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse and manage developers
    Developers {
        #[command(subcommand)]
        action: DeveloperAction,
    },
    /// Browse and manage projects
    Projects {
        #[command(subcommand)]
        action: ProjectAction,
    },
    /// Assign a developer to a project
    Assign { developer: DbId, project: DbId },
    /// Remove a developer from a project
    Unassign { developer: DbId, project: DbId },
}

#[derive(Debug, Subcommand)]
pub enum DeveloperAction {
    List(DeveloperListArgs),
    Show { id: DbId },
    /// Register a new developer
    Create(DeveloperCreateArgs),
    /// Change fields of an existing developer; omitted fields keep their value
    Update {
        id: DbId,
        #[command(flatten)]
        fields: DeveloperEditArgs,
    },
    Deactivate { id: DbId },
    Reactivate { id: DbId },
}

#[derive(Debug, Subcommand)]
pub enum ProjectAction {
    List(ProjectListArgs),
    Show { id: DbId },
    /// Register a new project
    Create(ProjectCreateArgs),
    /// Change fields of an existing project; omitted fields keep their value
    Update {
        id: DbId,
        #[command(flatten)]
        fields: ProjectEditArgs,
    },
    Deactivate { id: DbId },
    Reactivate { id: DbId },
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum StatusArg {
    #[default]
    All,
    Active,
    Inactive,
}

impl From<StatusArg> for StatusFilter {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::All => Self::All,
            StatusArg::Active => Self::Active,
            StatusArg::Inactive => Self::Inactive,
        }
    }
}

#[derive(Debug, Default, Args)]
pub struct DeveloperListArgs {
    /// Case-insensitive name substring
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long, value_enum, default_value_t)]
    pub status: StatusArg,
    #[arg(long)]
    pub exp_min: Option<u32>,
    #[arg(long)]
    pub exp_max: Option<u32>,
    /// Minimum number of assigned projects
    #[arg(long)]
    pub projects_min: Option<usize>,
    #[arg(long)]
    pub projects_max: Option<usize>,
}

impl DeveloperListArgs {
    /// Bounds go through the same edits as an interactive filter, so a
    /// minimum above the maximum clears the maximum.
    pub fn filter(&self) -> DeveloperFilter {
        let mut filter = DeveloperFilter {
            search_name: self.search.clone().unwrap_or_default(),
            status: self.status.into(),
            ..DeveloperFilter::default()
        };
        filter.experience.set_max(self.exp_max);
        filter.experience.set_min(self.exp_min);
        filter.projects.set_max(self.projects_max);
        filter.projects.set_min(self.projects_min);
        filter
    }
}

#[derive(Debug, Default, Args)]
pub struct ProjectListArgs {
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long, value_enum, default_value_t)]
    pub status: StatusArg,
    /// Earliest start date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_day)]
    pub start_from: Option<NaiveDate>,
    #[arg(long, value_parser = parse_day)]
    pub start_to: Option<NaiveDate>,
    #[arg(long, value_parser = parse_day)]
    pub end_from: Option<NaiveDate>,
    #[arg(long, value_parser = parse_day)]
    pub end_to: Option<NaiveDate>,
    #[arg(long)]
    pub developers_min: Option<usize>,
    #[arg(long)]
    pub developers_max: Option<usize>,
}

impl ProjectListArgs {
    pub fn filter(&self) -> ProjectFilter {
        let mut filter = ProjectFilter {
            search_name: self.search.clone().unwrap_or_default(),
            status: self.status.into(),
            ..ProjectFilter::default()
        };
        filter.start_date.set_max(self.start_to);
        filter.start_date.set_min(self.start_from);
        filter.end_date.set_max(self.end_to);
        filter.end_date.set_min(self.end_from);
        filter.developers.set_max(self.developers_max);
        filter.developers.set_min(self.developers_min);
        filter
    }
}

#[derive(Debug, Args)]
pub struct DeveloperCreateArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub national_id: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, value_parser = parse_day)]
    pub hire_date: NaiveDate,
    /// Years of experience
    #[arg(long)]
    pub years: u32,
}

impl From<DeveloperCreateArgs> for DeveloperPayload {
    fn from(args: DeveloperCreateArgs) -> Self {
        Self {
            full_name: args.name,
            national_id: args.national_id,
            email: args.email,
            hire_date: args.hire_date,
            years_experience: args.years,
        }
    }
}

#[derive(Debug, Default, Args)]
pub struct DeveloperEditArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub national_id: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long, value_parser = parse_day)]
    pub hire_date: Option<NaiveDate>,
    #[arg(long)]
    pub years: Option<u32>,
}

impl DeveloperEditArgs {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.national_id.is_none()
            && self.email.is_none()
            && self.hire_date.is_none()
            && self.years.is_none()
    }

    /// Overwrite only the fields given on the command line.
    pub fn apply(self, payload: &mut DeveloperPayload) {
        if let Some(name) = self.name {
            payload.full_name = name;
        }
        if let Some(national_id) = self.national_id {
            payload.national_id = national_id;
        }
        if let Some(email) = self.email {
            payload.email = email;
        }
        if let Some(hire_date) = self.hire_date {
            payload.hire_date = hire_date;
        }
        if let Some(years) = self.years {
            payload.years_experience = years;
        }
    }
}

#[derive(Debug, Args)]
pub struct ProjectCreateArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, value_parser = parse_day)]
    pub start: NaiveDate,
    #[arg(long, value_parser = parse_day)]
    pub end: NaiveDate,
}

impl From<ProjectCreateArgs> for ProjectPayload {
    fn from(args: ProjectCreateArgs) -> Self {
        Self {
            name: args.name,
            start_date: args.start,
            end_date: args.end,
        }
    }
}

#[derive(Debug, Default, Args)]
pub struct ProjectEditArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long, value_parser = parse_day)]
    pub start: Option<NaiveDate>,
    #[arg(long, value_parser = parse_day)]
    pub end: Option<NaiveDate>,
}

impl ProjectEditArgs {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.start.is_none() && self.end.is_none()
    }

    pub fn apply(self, payload: &mut ProjectPayload) {
        if let Some(name) = self.name {
            payload.name = name;
        }
        if let Some(start) = self.start {
            payload.start_date = start;
        }
        if let Some(end) = self.end {
            payload.end_date = end;
        }
    }
}

fn parse_day(raw: &str) -> Result<NaiveDate, String> {
    parse_date(raw).ok_or_else(|| format!("expected a date like 2024-03-01, got {raw:?}"))
}
