use std::path::PathBuf;

use chrono::Local;

use mano_mitra::AppState;
use mano_mitra::geocoding::{resolve_address, NominatimGeocoder};
use mano_mitra::storage::FolderStorage;

const DATA_FOLDER: &str = "mano-mitra-data";

fn print_usage() {
    println!("Usage:");
    println!("    companion                  show this month, today's reminders, caregivers and locations");
    println!("    companion geocode LAT LNG  look up the address of a point");
    println!();
    println!("Data is read from $MANO_MITRA_DATA, or from ./{}", DATA_FOLDER);
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.iter().map(|a| a.as_str()).collect::<Vec<_>>().as_slice() {
        [] => show_overview(),
        ["geocode", lat, lng] => {
            let (lat, lng) = match (lat.parse::<f64>(), lng.parse::<f64>()) {
                (Ok(lat), Ok(lng)) => (lat, lng),
                _ => {
                    log::error!("Invalid coordinates {:?} {:?}", lat, lng);
                    print_usage();
                    return;
                },
            };
            let geocoder = NominatimGeocoder::default();
            println!("{}", resolve_address(&geocoder, lat, lng).await);
        },
        _ => print_usage(),
    }
}

fn show_overview() {
    let folder = std::env::var("MANO_MITRA_DATA")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DATA_FOLDER));
    let now = Local::now().naive_local();
    let today = now.date();

    let state = AppState::load(FolderStorage::new(&folder), today);

    let index = state.calendar_index();
    mano_mitra::utils::print_month(&mano_mitra::calendar::MonthView::containing(today), &index, today, Some(today));
    println!();

    println!("---- Today -----");
    let schedule = state.day_schedule(today, now);
    mano_mitra::utils::print_day(&schedule, state.locations());
    println!();

    println!("---- Caregivers -----");
    mano_mitra::utils::print_caregivers(state.caregivers(), state.primary_caregiver_id());
    println!();

    println!("---- Locations -----");
    mano_mitra::utils::print_locations(state.locations());
}
