//! Subroutine wire format and transcoding.

#![allow(missing_docs)]

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use tracing::warn;

use crate::address::monitor_addrs;
use crate::error::ModelError;
use crate::matrix::{CellData, CellId, MatrixData, MAX_INDEX};
use crate::store::{RungStore, RungType};

/// One cell as transmitted by the server. `type` is `"inp"` or
/// `"outp"`; `col` is always 0 for outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    #[serde(rename = "type")]
    pub kind: SmolStr,
    pub row: u32,
    pub col: u32,
    pub addr: Vec<SmolStr>,
    pub value: SmolStr,
    pub monitor: Vec<SmolStr>,
}

/// One rung as transmitted by the server. `matrixdata` holds occupied
/// cells only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RungRecord {
    pub rungtype: SmolStr,
    pub comment: String,
    pub ildata: Vec<String>,
    pub matrixdata: Vec<CellRecord>,
}

/// One subroutine as transmitted by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubroutineRecord {
    pub subrname: SmolStr,
    pub subrcomments: String,
    pub signature: u64,
    pub subrdata: Vec<RungRecord>,
}

impl SubroutineRecord {
    /// Parse a subroutine from its JSON wire form.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Serialize the subroutine to its JSON wire form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// A loaded subroutine: rung store plus HMI metadata and the monitor
/// address list.
#[derive(Debug, Clone, Default)]
pub struct Subroutine {
    pub name: SmolStr,
    pub comments: String,
    pub signature: u64,
    pub store: RungStore,
    monitor: Vec<SmolStr>,
}

impl Subroutine {
    /// Build a subroutine from a wire record.
    ///
    /// Any rung whose cells exceed the 8x8 input grid or 8 output rows
    /// and whose type is not already `il` is downgraded to `il` with an
    /// emptied matrix; the IL text representation carries it instead.
    /// This is the editor's capacity limit, not an error.
    pub fn import(record: &SubroutineRecord) -> Result<Self, ModelError> {
        let mut store = RungStore::new();
        let mut monitor: Vec<SmolStr> = Vec::new();

        for rung_record in &record.subrdata {
            let reference = store.append_empty_rung();
            let mut rungtype = RungType::parse(&rung_record.rungtype)?;
            let mut matrix = MatrixData::new();

            for cell in &rung_record.matrixdata {
                match cell_record_id(cell) {
                    Ok(id) => {
                        matrix.set(id, CellData::new(cell.value.clone(), cell.addr.clone()));
                    }
                    Err(ModelError::CellOutOfBounds { .. }) => {
                        // The grid cannot represent this rung.
                        if rungtype != RungType::Il {
                            warn!(
                                reference = reference.0,
                                rungtype = rungtype.as_str(),
                                "rung exceeds the edit grid, downgrading to il"
                            );
                            rungtype = RungType::Il;
                        }
                        matrix = MatrixData::new();
                        break;
                    }
                    Err(err) => return Err(err),
                }
            }
            if rungtype == RungType::Il {
                matrix = MatrixData::new();
            }

            for cell in &rung_record.matrixdata {
                for addr in &cell.monitor {
                    if addr != "none" {
                        monitor.push(addr.clone());
                    }
                }
            }

            let rung = store.rung_mut(reference)?;
            rung.rungtype = rungtype;
            rung.comment.clone_from(&rung_record.comment);
            rung.ildata.clone_from(&rung_record.ildata);
            rung.matrixdata = matrix;
        }

        // Sort first so removing adjacent duplicates de-duplicates fully.
        monitor.sort_unstable();
        monitor.dedup();

        Ok(Self {
            name: record.subrname.clone(),
            comments: record.subrcomments.clone(),
            signature: record.signature,
            store,
            monitor,
        })
    }

    /// Produce the wire record for this subroutine. Walks every input
    /// and output slot in row-major order and emits occupied cells only;
    /// `monitor` on each cell is recomputed from its addresses.
    #[must_use]
    pub fn export(&self) -> SubroutineRecord {
        let subrdata = self
            .store
            .iter()
            .map(|rung| {
                let mut matrixdata = Vec::new();
                for row in 0..=MAX_INDEX {
                    for col in 0..=MAX_INDEX {
                        let id = CellId::Input { row, col };
                        if let Some(cell) = rung.matrixdata.get(id) {
                            matrixdata.push(cell_record(id, cell));
                        }
                    }
                }
                for row in 0..=MAX_INDEX {
                    let id = CellId::Output { row };
                    if let Some(cell) = rung.matrixdata.get(id) {
                        matrixdata.push(cell_record(id, cell));
                    }
                }
                RungRecord {
                    rungtype: rung.rungtype.into(),
                    comment: rung.comment.clone(),
                    ildata: rung.ildata.clone(),
                    matrixdata,
                }
            })
            .collect();

        SubroutineRecord {
            subrname: self.name.clone(),
            subrcomments: self.comments.clone(),
            signature: self.signature,
            subrdata,
        }
    }

    /// De-duplicated, sorted addresses the HMI should monitor for this
    /// subroutine.
    #[must_use]
    pub fn monitor_list(&self) -> &[SmolStr] {
        &self.monitor
    }
}

fn cell_record_id(cell: &CellRecord) -> Result<CellId, ModelError> {
    let out_of_bounds = || ModelError::CellOutOfBounds {
        row: cell.row,
        col: cell.col,
    };
    let row = bounded_index(cell.row).ok_or_else(out_of_bounds)?;
    match cell.kind.as_str() {
        "inp" => {
            let col = bounded_index(cell.col).ok_or_else(out_of_bounds)?;
            Ok(CellId::Input { row, col })
        }
        "outp" => Ok(CellId::Output { row }),
        _ => Err(ModelError::InvalidCellRecord(cell.kind.clone())),
    }
}

fn bounded_index(value: u32) -> Option<u8> {
    u8::try_from(value).ok().filter(|index| *index <= MAX_INDEX)
}

fn cell_record(id: CellId, cell: &CellData) -> CellRecord {
    let (kind, row, col) = match id {
        CellId::Input { row, col } => ("inp", row, col),
        CellId::Output { row } => ("outp", row, 0),
    };
    CellRecord {
        kind: SmolStr::new_static(kind),
        row: u32::from(row),
        col: u32::from(col),
        addr: cell.addr.clone(),
        value: cell.value.clone(),
        monitor: monitor_addrs(&cell.addr),
    }
}
