//! Pre-built in-memory bundles for testing.
//!
//! These scenarios provide realistic section text for a two-aggregate
//! controller: `aggr0` (one SAS RAID group, growing, under 90 %) and `aggr1`
//! (two SSD RAID groups, already above 90 %).

use super::SectionKind;
use super::source::MockSource;

/// Controller overview.
pub const OVERVIEW: &str = "\
<asup>
<asup_id>2026101612340001</asup_id>
<asup_received_date>2026-10-16</asup_received_date>
<biz_key>C|93E0D750|8499809755|721545000241</biz_key>
<cluster_name>cluster-east</cluster_name>
<hostname>filer01</hostname>
<site_name>Raleigh</site_name>
<sys_version>NetApp Release 8.3.2P5</sys_version>
<system_id>0536887241</system_id>
<sys_model>FAS8040</sys_model>
<sys_serial_no>721545000241</sys_serial_no>
<warranty_end_date>2027-03-31</warranty_end_date>
</asup>
";

/// `sysconfig -r` output: aggr0 has one SAS group, aggr1 two SSD groups.
pub const SYSCONFIG_R: &str = "\
<section name=\"SYSCONFIG-R\">
<data>
Aggregate aggr0 (online, raid_dp) (block checksums)
  Plex /aggr0/plex0 (online, normal, active)
    RAID group /aggr0/plex0/rg0 (normal, block checksums)

      RAID Disk Device  HA  SHELF BAY CHAN Pool Type  RPM  Used (MB/blks)    Phys (MB/blks)
      --------- ------  ------------- ---- ---- ---- ----- --------------    --------------
      dparity   0a.00.0 0a    0   0   SA:A   0  SAS 10000 560000/1146880000 572325/1172123568
      parity    0a.00.1 0a    0   1   SA:A   0  SAS 10000 560000/1146880000 572325/1172123568
      data      0a.00.2 0a    0   2   SA:A   0  SAS 10000 560000/1146880000 572325/1172123568
      data      0a.00.3 0a    0   3   SA:A   0  SAS 10000 560000/1146880000 572325/1172123568
      data      0a.00.4 0a    0   4   SA:A   0  SAS 10000 560000/1146880000 572325/1172123568

Aggregate aggr1 (online, raid_dp) (block checksums)
  Plex /aggr1/plex0 (online, normal, active)
    RAID group /aggr1/plex0/rg0 (normal, block checksums)

      RAID Disk Device  HA  SHELF BAY CHAN Pool Type  RPM  Used (MB/blks)    Phys (MB/blks)
      --------- ------  ------------- ---- ---- ---- ----- --------------    --------------
      dparity   0b.01.0 0b    1   0   SA:B   0  SSD   N/A 760000/1556480000 763097/1562824368
      parity    0b.01.1 0b    1   1   SA:B   0  SSD   N/A 760000/1556480000 763097/1562824368
      data      0b.01.2 0b    1   2   SA:B   0  SSD   N/A 760000/1556480000 763097/1562824368
      data      0b.01.3 0b    1   3   SA:B   0  SSD   N/A 760000/1556480000 763097/1562824368
      data      0b.01.4 0b    1   4   SA:B   0  SSD   N/A 760000/1556480000 763097/1562824368
      data      0b.01.5 0b    1   5   SA:B   0  SSD   N/A 760000/1556480000 763097/1562824368

    RAID group /aggr1/plex0/rg1 (normal, block checksums)

      RAID Disk Device  HA  SHELF BAY CHAN Pool Type  RPM  Used (MB/blks)    Phys (MB/blks)
      --------- ------  ------------- ---- ---- ---- ----- --------------    --------------
      dparity   0b.01.6 0b    1   6   SA:B   0  SSD   N/A 760000/1556480000 763097/1562824368
      parity    0b.01.7 0b    1   7   SA:B   0  SSD   N/A 760000/1556480000 763097/1562824368
      data      0b.01.8 0b    1   8   SA:B   0  SSD   N/A 760000/1556480000 763097/1562824368
      data      0b.01.9 0b    1   9   SA:B   0  SSD   N/A 760000/1556480000 763097/1562824368
      data      0b.01.10 0b   1  10   SA:B   0  SSD   N/A 760000/1556480000 763097/1562824368
      data      0b.01.11 0b   1  11   SA:B   0  SSD   N/A 760000/1556480000 763097/1562824368

Spare disks

RAID Disk Device  HA  SHELF BAY CHAN Pool Type  RPM  Used (MB/blks)    Phys (MB/blks)
--------- ------  ------------- ---- ---- ---- ----- --------------    --------------
Spare disks for block checksum
spare     0a.00.20 0a   0  20   SA:A   0  SAS 10000 560000/1146880000 572325/1172123568
</data>
</section>
";

/// `df -A` history, most recent week first. aggr0 is 10 TB and grows
/// 0.5 TB/week from 5 TB; aggr1 is 20 TB and grows 0.5 TB/week from 18 TB.
pub const DF_A: &str = "\
<section name=\"DF-A\">
<week end=\"2026-10-12\"><![CDATA[
Aggregate                kbytes        used       avail capacity
aggr0               10737418240  6442450944  4294967296      60%
aggr0/.snapshot               0           0           0     ---%
aggr1               21474836480 20401094656  1073741824      95%
aggr1/.snapshot               0           0           0     ---%
]]></week>
<week end=\"2026-10-05\"><![CDATA[
Aggregate                kbytes        used       avail capacity
aggr0               10737418240  5905580032  4831838208      55%
aggr0/.snapshot               0           0           0     ---%
aggr1               21474836480 19864223744  1610612736      93%
aggr1/.snapshot               0           0           0     ---%
]]></week>
<week end=\"2026-09-28\"><![CDATA[
Aggregate                kbytes        used       avail capacity
aggr0               10737418240  5368709120  5368709120      50%
aggr0/.snapshot               0           0           0     ---%
aggr1               21474836480 19327352832  2147483648      90%
aggr1/.snapshot               0           0           0     ---%
]]></week>
</section>
";

/// Aggregate object view.
pub const AGGREGATE: &str = "\
<results>
<aggregate><aggr_name>aggr0</aggr_name><aggr_allocated_kb>10737418240</aggr_allocated_kb><aggr_used_pct>60</aggr_used_pct><aggr_raid_type>raid_dp</aggr_raid_type></aggregate>
<aggregate><aggr_name>aggr1</aggr_name><aggr_allocated_kb>21474836480</aggr_allocated_kb><aggr_used_pct>95</aggr_used_pct><aggr_raid_type>raid_dp</aggr_raid_type></aggregate>
</results>
";

/// Two samples of each system counter; no FCP samples.
pub const SYSTEM_COUNTERS: &str = "\
<counters>
<sample><counterName>cpu_busy</counterName><counterValue>40</counterValue></sample>
<sample><counterName>cifs_ops</counterName><counterValue>0</counterValue></sample>
<sample><counterName>iscsi_ops</counterName><counterValue>10</counterValue></sample>
<sample><counterName>nfs_ops</counterName><counterValue>1000</counterValue></sample>
<sample><counterName>cpu_busy</counterName><counterValue>50</counterValue></sample>
<sample><counterName>cifs_ops</counterName><counterValue>0</counterValue></sample>
<sample><counterName>iscsi_ops</counterName><counterValue>30</counterValue></sample>
<sample><counterName>nfs_ops</counterName><counterValue>1200</counterValue></sample>
</counters>
";

/// Mean total ops per volume; every volume is reported twice.
pub const VOLUME_COUNTERS: &str = "\
<stats>
<row><instance_name>vol0</instance_name><counter_stat_value>120.5</counter_stat_value></row>
<row><instance_name>vol0</instance_name><counter_stat_value>120.5</counter_stat_value></row>
<row><instance_name>vol1</instance_name><counter_stat_value>-33.25</counter_stat_value></row>
<row><instance_name>vol1</instance_name><counter_stat_value>-33.25</counter_stat_value></row>
<row><instance_name>vol total</instance_name><counter_stat_value>87 ops</counter_stat_value></row>
</stats>
";

#[allow(dead_code)]
impl MockSource {
    /// Creates a complete bundle for a two-aggregate controller.
    pub fn typical_bundle() -> Self {
        let mut source = Self::new();
        source.add_section(SectionKind::Overview, OVERVIEW);
        source.add_section(SectionKind::SysconfigR, SYSCONFIG_R);
        source.add_section(SectionKind::DfA, DF_A);
        source.add_section(SectionKind::AggregateObject, AGGREGATE);
        source.add_section(SectionKind::SystemCounters, SYSTEM_COUNTERS);
        source.add_section(SectionKind::VolumeCounters, VOLUME_COUNTERS);
        source
    }

    /// Creates a bundle that only carries the overview section.
    pub fn overview_only() -> Self {
        let mut source = Self::new();
        source.add_section(SectionKind::Overview, OVERVIEW);
        source
    }
}
