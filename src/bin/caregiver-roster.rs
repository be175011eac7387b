#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use caregiver_roster::{
    html, io,
    model::{Caregiver, Roster, Shift},
    pay::PayPeriod,
    storage::{JsonStorage, Storage},
    AvailabilityStatus, CalendarGrid, RandomPicker, Schedule, Scheduler, WeekdayKey,
    DEFAULT_PAY_RATE,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de planning des aidants (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du roster
    #[arg(long, global = true, default_value = "roster.json")]
    roster: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ajouter un aidant
    AddCaregiver {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value_t = DEFAULT_PAY_RATE)]
        pay_rate: f64,
    },

    /// Importer des aidants depuis un CSV
    ImportCaregivers {
        #[arg(long)]
        csv: String,
    },

    /// Importer des disponibilités depuis un CSV
    ImportAvailability {
        #[arg(long)]
        csv: String,
    },

    /// Fixer une disponibilité
    SetAvailability {
        #[arg(long)]
        name: String,
        /// Clé de jour 1..=7 (1 = lundi)
        #[arg(long)]
        day: u32,
        /// AM | PM
        #[arg(long)]
        shift: String,
        /// preferred | available | unavailable
        #[arg(long)]
        status: String,
    },

    /// Saisir les disponibilités au clavier
    Prompt {
        /// Un seul aidant ; tous par défaut
        #[arg(long)]
        name: Option<String>,
    },

    /// Générer le planning d'un mois et l'écrire en HTML
    Generate {
        #[arg(long)]
        year: i32,
        /// 1..=12
        #[arg(long)]
        month: u32,
        /// Répertoire de sortie du fichier HTML
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// Graine pour un tirage reproductible
        #[arg(long)]
        seed: Option<u64>,
        /// Export CSV du planning (optionnel)
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Afficher la paie et clore la période
    Report {
        /// weekly | monthly
        #[arg(long, default_value = "weekly")]
        period: String,
        /// Affiche sans remettre les heures à zéro
        #[arg(long)]
        preview: bool,
    },

    /// Lister les aidants
    List,

    /// Saisie, génération, HTML et paie en une passe, sans toucher au roster JSON
    Run {
        #[arg(long)]
        year: i32,
        /// 1..=12
        #[arg(long)]
        month: u32,
        /// Aidants à charger (CSV) ; sinon copie du roster JSON
        #[arg(long)]
        csv: Option<String>,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        #[arg(long)]
        seed: Option<u64>,
        /// weekly | monthly
        #[arg(long, default_value = "weekly")]
        period: String,
        /// Garde les disponibilités chargées sans les demander
        #[arg(long)]
        no_prompt: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.roster);
    let mut scheduler = Scheduler::from_roster(storage.load_or_default()?);

    let code = match cli.cmd {
        Commands::AddCaregiver {
            name,
            phone,
            email,
            pay_rate,
        } => {
            if scheduler.roster().find_by_name(&name).is_some() {
                bail!("caregiver already exists: {name}");
            }
            let caregiver = Caregiver::new(name, phone, email).with_pay_rate(pay_rate);
            scheduler.add_caregivers(vec![caregiver]);
            storage.save(scheduler.roster())?;
            0
        }
        Commands::ImportCaregivers { csv } => {
            let caregivers = io::import_caregivers_csv(csv)?;
            for (i, c) in caregivers.iter().enumerate() {
                if scheduler.roster().find_by_name(&c.name).is_some()
                    || caregivers[..i].iter().any(|o| o.name == c.name)
                {
                    bail!("caregiver already exists: {}", c.name);
                }
            }
            println!("imported {} caregiver(s)", caregivers.len());
            scheduler.add_caregivers(caregivers);
            storage.save(scheduler.roster())?;
            0
        }
        Commands::ImportAvailability { csv } => {
            let applied = io::import_availability_csv(csv, scheduler.roster_mut())?;
            println!("applied {applied} availability row(s)");
            storage.save(scheduler.roster())?;
            0
        }
        Commands::SetAvailability {
            name,
            day,
            shift,
            status,
        } => {
            let shift: Shift = shift.parse()?;
            let status = AvailabilityStatus::parse_lenient(&status);
            let id = scheduler
                .roster()
                .find_by_name(&name)
                .map(|c| c.id.clone())
                .ok_or_else(|| anyhow::anyhow!("unknown caregiver: {}", name))?;
            scheduler.set_status(&id, day, shift, status)?;
            storage.save(scheduler.roster())?;
            0
        }
        Commands::Prompt { name } => {
            prompt_availability(scheduler.roster_mut(), name.as_deref())?;
            storage.save(scheduler.roster())?;
            0
        }
        Commands::Generate {
            year,
            month,
            out_dir,
            seed,
            out_csv,
        } => {
            if scheduler.roster().caregivers.is_empty() {
                bail!("aucun aidant dans le roster");
            }
            let schedule = generate_calendar(&mut scheduler, year, month, seed, &out_dir)?;
            if let Some(csv) = out_csv {
                io::export_schedule_csv(csv, &schedule, scheduler.roster())?;
            }
            storage.save(scheduler.roster())?;
            completion_code(&schedule)
        }
        Commands::Report { period, preview } => {
            let period: PayPeriod = period.parse().map_err(anyhow::Error::msg)?;
            let report = if preview {
                scheduler.pending_pay()
            } else {
                let report = scheduler.close_period();
                storage.save(scheduler.roster())?;
                report
            };
            print!("{}", report.render_text(period));
            0
        }
        Commands::List => {
            for c in &scheduler.roster().caregivers {
                println!(
                    "{} | {} | {} | ${:.2}/h | {}h pending",
                    c.name, c.phone, c.email, c.pay_rate, c.hours
                );
                for day in WeekdayKey::all() {
                    let statuses: Vec<String> = Shift::ALL
                        .iter()
                        .map(|&s| format!("{}={}", s, c.availability.get(day, s)))
                        .collect();
                    println!("    {:<9} {}", day.name(), statuses.join(" "));
                }
            }
            0
        }
        Commands::Run {
            year,
            month,
            csv,
            out_dir,
            seed,
            period,
            no_prompt,
        } => {
            let period: PayPeriod = period.parse().map_err(anyhow::Error::msg)?;
            // période de paie propre à cette exécution
            let roster = match csv {
                Some(csv) => Roster {
                    caregivers: io::import_caregivers_csv(csv)?,
                },
                None => {
                    let mut roster = scheduler.roster().clone();
                    roster.caregivers.iter_mut().for_each(|c| c.hours = 0);
                    roster
                }
            };
            if roster.caregivers.is_empty() {
                bail!("aucun aidant à planifier");
            }
            let mut session = Scheduler::from_roster(roster);
            if !no_prompt {
                prompt_availability(session.roster_mut(), None)?;
            }
            let schedule = generate_calendar(&mut session, year, month, seed, &out_dir)?;
            println!();
            print!("{}", session.close_period().render_text(period));
            completion_code(&schedule)
        }
    };

    std::process::exit(code);
}

/// Saisie clavier pour un aidant nommé, ou pour tous.
fn prompt_availability(roster: &mut Roster, name: Option<&str>) -> Result<()> {
    if let Some(name) = name {
        if roster.find_by_name(name).is_none() {
            bail!("unknown caregiver: {name}");
        }
    }
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    for caregiver in roster.caregivers.iter_mut() {
        if name.is_some_and(|n| n != caregiver.name) {
            continue;
        }
        io::collect_availability(stdin.lock(), stdout.lock(), caregiver)?;
    }
    Ok(())
}

/// Génère le mois et écrit le calendrier HTML dans `out_dir`.
fn generate_calendar(
    scheduler: &mut Scheduler,
    year: i32,
    month: u32,
    seed: Option<u64>,
    out_dir: &Path,
) -> Result<Schedule> {
    let mut picker = match seed {
        Some(seed) => RandomPicker::seeded(seed),
        None => RandomPicker::from_entropy(),
    };
    let schedule = scheduler.generate(year, month, &mut picker)?;
    let grid = CalendarGrid::build(&schedule, scheduler.roster())?;
    let path = html::write_html(out_dir, &grid)
        .with_context(|| format!("saving calendar for {year}-{month}"))?;
    println!(
        "Schedule for {} {} saved as HTML: {}",
        grid.month_name(),
        year,
        path.display()
    );
    Ok(schedule)
}

fn completion_code(schedule: &Schedule) -> i32 {
    let missing = schedule.cell_count() - schedule.assigned_count();
    if missing == 0 {
        0
    } else {
        eprintln!("{missing} shift(s) left unassigned");
        // Code 2 = WARNING/INCOMPLETE
        2
    }
}
