// End-to-end demo of a guest session against an in-memory tag image:
// initialize, scan, tag arrival, identification, app data, writeback.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use nfcemu::prelude::*;
use nfcemu::storage::mock::MockStorage;
use nfcemu::test_support;

fn main() -> Result<()> {
    env_logger::init();

    // Seed an in-memory store with a decrypted tag image. Point a
    // FsStorage at a dump directory instead to drive real files.
    let storage = Arc::new(MockStorage::new());
    let path = Path::new("figure.bin");
    storage.insert_image("figure.bin", test_support::logical_image());

    let (user, _manager) = install_interfaces(Box::new(Arc::clone(&storage)));

    user.initialize(1)?;
    let entered = user.get_tag_in_range_event()?;
    user.start_tag_scanning(0)?;
    println!("scanning, state = {}", user.get_tag_state()?);

    // Host side: the tag touches the reader.
    assert!(user.load_tag(path));
    assert!(entered.try_take());
    println!("tag entered range, state = {}", user.get_tag_state()?);

    let info = user.get_tag_info()?;
    println!(
        "tag uuid = {}",
        info.id[..info.id_offset_size as usize]
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect::<String>()
    );

    let config = user.get_amiibo_config()?;
    println!(
        "character {:#06x} variant {} series {} (written {} times, last {}-{:02}-{:02})",
        config.char_id,
        config.char_variant,
        config.series,
        config.write_count,
        config.last_write_year,
        config.last_write_month,
        config.last_write_day,
    );

    let (status, settings) = user.get_amiibo_settings();
    status?;
    let nickname: String = settings
        .nickname
        .iter()
        .take_while(|&&c| c != 0)
        .filter_map(|&c| char::from_u32(c as u32))
        .collect();
    println!("owner nickname = {:?}", nickname);

    user.open_app_data(AppId::new(test_support::TEST_APP_ID))?;
    let data = user.read_app_data()?;
    println!("app data starts with {:02x} {:02x} {:02x}", data[0], data[1], data[2]);

    // Mutate the region and write the tag back to its image.
    let mut updated = data;
    updated[0] = updated[0].wrapping_add(1);
    user.write_app_data(&updated, updated.len())?;
    user.update_stored_amiibo_data()?;
    println!("written back, state = {}", user.get_tag_state()?);
    println!("images persisted: {}", storage.saved().len());

    Ok(())
}
