use std::fs::File;
use std::io::Error;
use std::path::Path;

const GATEWAYS: [&str; 3] = ["alipay", "wechat_pay", "unionpay"];

/// Writes a replay file with a full fulfilment flow for `orders` orders.
///
/// Each order contributes five rows: checkout, submit, settle_success,
/// ship, deliver.
pub fn generate_csv(path: &Path, orders: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["event", "order", "gateway", "amount"])?;

    for i in 1..=orders {
        let id = i.to_string();
        let gateway = GATEWAYS[i % GATEWAYS.len()];
        wtr.write_record(["checkout", &id, gateway, "9.99"])?;
        wtr.write_record(["submit", &id, "", ""])?;
        wtr.write_record(["settle_success", &id, "", ""])?;
        wtr.write_record(["ship", &id, "", ""])?;
        wtr.write_record(["deliver", &id, "", ""])?;
    }

    wtr.flush()?;
    Ok(())
}
