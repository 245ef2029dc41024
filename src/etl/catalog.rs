use crate::etl::frame::HeaderLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Production,
    Processing,
    Commercialization,
    Import,
    Export,
}

impl TableKind {
    /// Route segment and label used in refresh reports.
    pub fn label(self) -> &'static str {
        match self {
            TableKind::Production => "producao",
            TableKind::Processing => "processamento",
            TableKind::Commercialization => "comercializacao",
            TableKind::Import => "importacao",
            TableKind::Export => "exportacao",
        }
    }
}

/// How wide rows turn into long rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Capitalised rows open a category that the following rows belong to.
    Grouped,
    /// Each year appears twice: quantity, then value.
    Paired,
}

#[derive(Debug, Clone, Copy)]
pub struct SourceFile {
    /// File name relative to the download base URL.
    pub file: &'static str,
    /// Label stored as `categoria` for every row of this file.
    pub super_category: Option<&'static str>,
}

#[derive(Debug, Clone, Copy)]
pub struct SourceSpec {
    pub kind: TableKind,
    pub layout: Layout,
    pub key_column: &'static str,
    pub separator: u8,
    pub drop_column: Option<&'static str>,
    pub header: HeaderLayout,
    /// Cell values that stand for "no data" and load as zero.
    pub placeholders: &'static [&'static str],
    pub files: &'static [SourceFile],
}

const fn file(file: &'static str, super_category: &'static str) -> SourceFile {
    SourceFile {
        file,
        super_category: Some(super_category),
    }
}

/// Every file the refresh downloads, grouped by target table.
pub const CATALOG: &[SourceSpec] = &[
    SourceSpec {
        kind: TableKind::Production,
        layout: Layout::Grouped,
        key_column: "produto",
        separator: b';',
        drop_column: None,
        header: HeaderLayout::Present,
        placeholders: &[],
        files: &[SourceFile {
            file: "Producao.csv",
            super_category: None,
        }],
    },
    SourceSpec {
        kind: TableKind::Processing,
        layout: Layout::Grouped,
        key_column: "cultivar",
        separator: b'\t',
        drop_column: Some("control"),
        header: HeaderLayout::Present,
        placeholders: &["nd", "*"],
        files: &[
            file("ProcessaViniferas.csv", "Viniferas"),
            file("ProcessaAmericanas.csv", "Americana"),
            file("ProcessaMesa.csv", "Mesa"),
            file("ProcessaSemclass.csv", "Outras"),
        ],
    },
    SourceSpec {
        kind: TableKind::Commercialization,
        layout: Layout::Grouped,
        key_column: "produto",
        separator: b';',
        drop_column: Some("control"),
        header: HeaderLayout::Synthesized {
            leading: &["id", "control", "produto"],
            first_year: 1970,
        },
        placeholders: &[],
        files: &[SourceFile {
            file: "Comercio.csv",
            super_category: None,
        }],
    },
    SourceSpec {
        kind: TableKind::Import,
        layout: Layout::Paired,
        key_column: "pais",
        separator: b';',
        drop_column: None,
        header: HeaderLayout::Present,
        placeholders: &[],
        files: &[
            file("ImpVinhos.csv", "Vinho_Mesa"),
            file("ImpEspumantes.csv", "Espumante"),
            file("ImpFrescas.csv", "Uvas_frescas"),
            file("ImpPassas.csv", "Uvas_passas"),
            file("ImpSuco.csv", "Suco_uva"),
        ],
    },
    SourceSpec {
        kind: TableKind::Export,
        layout: Layout::Paired,
        key_column: "pais",
        separator: b';',
        drop_column: None,
        header: HeaderLayout::Present,
        placeholders: &[],
        files: &[
            file("ExpVinho.csv", "Vinho_Mesa"),
            file("ExpEspumantes.csv", "Espumante"),
            file("ExpUva.csv", "Uvas_frescas"),
            file("ExpSuco.csv", "Suco_uva"),
        ],
    },
];
