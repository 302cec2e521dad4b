//! SQL DDL for the garage database (SQLite).

/// Tables, in dependency order. Every row except `utenti` is owned by a user
/// through `utente_id`; uniqueness constraints are scoped per user.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS utenti (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL, -- sha256 hex digest
    nome_reale TEXT NULL
);

CREATE TABLE IF NOT EXISTS clienti (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    nome TEXT NOT NULL DEFAULT '',
    cognome TEXT NOT NULL DEFAULT '',
    data_nascita TEXT NOT NULL DEFAULT '',
    provincia TEXT NOT NULL DEFAULT '',
    comune TEXT NOT NULL DEFAULT '',
    codice_fiscale TEXT NOT NULL DEFAULT '',
    telefono TEXT NOT NULL DEFAULT '',
    email TEXT NOT NULL DEFAULT '',
    utente_id INTEGER NOT NULL REFERENCES utenti(id)
);

CREATE INDEX IF NOT EXISTS idx_clienti_utente ON clienti(utente_id);

CREATE TABLE IF NOT EXISTS vetture (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    cliente_id INTEGER NULL REFERENCES clienti(id),
    targa TEXT NOT NULL DEFAULT '',
    marca TEXT NOT NULL DEFAULT '',
    modello TEXT NOT NULL DEFAULT '',
    cilindrata TEXT NOT NULL DEFAULT '',
    kw TEXT NOT NULL DEFAULT '',
    carburante TEXT NOT NULL DEFAULT '',
    codice_motore TEXT NOT NULL DEFAULT '',
    telaio TEXT NOT NULL DEFAULT '',
    immatricolazione TEXT NOT NULL DEFAULT '',
    km TEXT NOT NULL DEFAULT '',
    cambio TEXT NOT NULL DEFAULT '',
    utente_id INTEGER NOT NULL REFERENCES utenti(id)
);

CREATE INDEX IF NOT EXISTS idx_vetture_utente ON vetture(utente_id);
CREATE INDEX IF NOT EXISTS idx_vetture_cliente ON vetture(cliente_id);

CREATE TABLE IF NOT EXISTS modelli (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    marca TEXT NOT NULL,
    modello TEXT NOT NULL,
    cilindrata TEXT NOT NULL DEFAULT '',
    kw TEXT NOT NULL DEFAULT '',
    carburante TEXT NOT NULL DEFAULT '',
    codice_motore TEXT NOT NULL DEFAULT '',
    utente_id INTEGER NOT NULL REFERENCES utenti(id),
    UNIQUE(utente_id, marca, modello, cilindrata, kw, codice_motore)
);

CREATE TABLE IF NOT EXISTS ricambi (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    nome TEXT NOT NULL,
    codice TEXT NOT NULL,
    quantita INTEGER NOT NULL DEFAULT 0,
    utente_id INTEGER NOT NULL REFERENCES utenti(id),
    UNIQUE(utente_id, codice)
);

CREATE TABLE IF NOT EXISTS modello_ricambi (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    modello_id INTEGER NOT NULL REFERENCES modelli(id),
    ricambio_id INTEGER NOT NULL REFERENCES ricambi(id),
    utente_id INTEGER NOT NULL REFERENCES utenti(id),
    UNIQUE(modello_id, ricambio_id)
);

CREATE TABLE IF NOT EXISTS gomme (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    marca TEXT NOT NULL,
    modello TEXT NOT NULL DEFAULT '',
    misura TEXT NOT NULL, -- e.g. 205/55 R16 91V
    stagione TEXT NOT NULL DEFAULT '',
    quantita INTEGER NOT NULL DEFAULT 0,
    posizione TEXT NOT NULL DEFAULT '', -- shelf / rack label
    utente_id INTEGER NOT NULL REFERENCES utenti(id)
);

CREATE TABLE IF NOT EXISTS lavorazioni (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    vettura_id INTEGER NULL REFERENCES vetture(id),
    descrizione TEXT NOT NULL,
    stato TEXT NOT NULL DEFAULT 'ordine inviato',
    note TEXT NOT NULL DEFAULT '',
    creata_il TEXT NOT NULL, -- RFC3339
    aggiornata_il TEXT NOT NULL, -- RFC3339
    utente_id INTEGER NOT NULL REFERENCES utenti(id)
);

CREATE INDEX IF NOT EXISTS idx_lavorazioni_utente_stato ON lavorazioni(utente_id, stato);

CREATE TABLE IF NOT EXISTS promemoria (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    titolo TEXT NOT NULL,
    info TEXT NOT NULL DEFAULT '',
    data_creazione TEXT NOT NULL, -- RFC3339
    utente_id INTEGER NOT NULL REFERENCES utenti(id)
);

CREATE TABLE IF NOT EXISTS storico_azioni (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    utente_id INTEGER NOT NULL REFERENCES utenti(id),
    azione TEXT NOT NULL,
    dettagli TEXT NOT NULL DEFAULT '',
    data TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_storico_utente ON storico_azioni(utente_id, id);
"#;

/// Columns added after the first deployments. Applied one by one at startup;
/// a "duplicate column" failure means the column is already there.
pub const SQLITE_ADDITIVE_COLUMNS: &[&str] = &[
    "ALTER TABLE ricambi ADD COLUMN quantita INTEGER NOT NULL DEFAULT 0",
    "ALTER TABLE utenti ADD COLUMN nome_reale TEXT NULL",
    "ALTER TABLE modelli ADD COLUMN carburante TEXT NOT NULL DEFAULT ''",
];
