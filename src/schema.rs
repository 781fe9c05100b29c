use sea_query::Iden;

/// ZCLOUDRECORDING table - one row per voice memo
#[derive(Iden)]
#[iden = "ZCLOUDRECORDING"]
pub enum CloudRecording {
    Table,
    #[iden = "ZPATH"]
    Path,
    #[iden = "ZDATE"]
    Date,
    #[iden = "ZCUSTOMLABEL"]
    CustomLabel,
    #[iden = "ZCUSTOMLABELFORSORTING"]
    CustomLabelForSorting,
    #[iden = "ZENCRYPTEDTITLE"]
    EncryptedTitle,
    #[iden = "ZUNIQUEID"]
    UniqueId,
    #[iden = "ZDURATION"]
    Duration,
    #[iden = "ZFOLDER"]
    Folder,
}

/// ZFOLDER table - user folders grouping recordings
#[derive(Iden)]
#[iden = "ZFOLDER"]
pub enum Folder {
    Table,
    #[iden = "Z_PK"]
    Pk,
    #[iden = "ZENCRYPTEDNAME"]
    EncryptedName,
}

/// sqlite_master catalog table
#[derive(Iden)]
#[iden = "sqlite_master"]
pub enum SqliteMaster {
    Table,
    Name,
    Type,
}
