pub mod adjudicacion;
pub mod catalogo;
pub mod flat_row;
pub mod partida;
pub mod payload;
pub mod snapshot;

pub use adjudicacion::{AwardedEntry, AwardedProvider};
pub use catalogo::{Catalogos, ServidorPublico};
pub use flat_row::{Estatus, FlatRow};
pub use partida::{Partida, ProviderCandidate, Rubro};
pub use payload::{Accion, AdjudicarPayload, GestionPayload};
pub use snapshot::{DetailSnapshot, DetalleGeneral, MeetingSchedule};
